pub mod examples {
    use certs_core::model::Verdict;
    use serde_json::Value;
    use std::sync::LazyLock;

    fn to_value(verdict: Verdict) -> Value {
        serde_json::to_value(verdict).expect("verdict is serializable to Value")
    }

    static FOUND: LazyLock<Value> = LazyLock::new(|| to_value(Verdict::found()));
    static NOT_FOUND: LazyLock<Value> = LazyLock::new(|| to_value(Verdict::not_found()));
    static ID_REQUIRED: LazyLock<Value> = LazyLock::new(|| to_value(Verdict::id_required()));
    static LOOKUP_ERROR: LazyLock<Value> = LazyLock::new(|| to_value(Verdict::lookup_error()));

    pub fn found() -> &'static Value {
        &FOUND
    }

    pub fn not_found() -> &'static Value {
        &NOT_FOUND
    }

    pub fn id_required() -> &'static Value {
        &ID_REQUIRED
    }

    pub fn lookup_error() -> &'static Value {
        &LOOKUP_ERROR
    }
}
