//! Request payloads and query parameters.

pub mod configuracao;
pub mod empresa;
pub mod proposta;
pub mod servico;

pub use configuracao::ConfiguracaoPayload;
pub use empresa::{EmpresaCreate, EmpresaUpdate};
pub use proposta::{
    ItemPropostaPayload, PreviewPayload, PropostaCreate, PropostaListQuery, PropostaUpdate,
};
pub use servico::{ServicoCreate, ServicoListQuery, ServicoUpdate};

pub(crate) mod lenient {
    //! Permissive numeric coercion: a missing, null or non-numeric value in
    //! a draft payload coerces to a default instead of rejecting the request.

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn coerce(value: Option<Value>) -> Option<f64> {
        match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce to `0.0`.
    pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(coerce(value).unwrap_or(0.0))
    }

    /// Coerce to `1.0` (item quantity defaults to one unit).
    pub fn f64_or_one<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(coerce(value).unwrap_or(1.0))
    }

    /// Coerce for partial updates: a value that does not parse as a number
    /// counts as absent, leaving the stored field untouched.
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(coerce(value))
    }

    pub fn one() -> f64 {
        1.0
    }

    #[cfg(test)]
    mod tests {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "super::f64_or_zero")]
            valor: f64,
            #[serde(default = "super::one", deserialize_with = "super::f64_or_one")]
            quantidade: f64,
        }

        #[test]
        fn numbers_pass_through() {
            let p: Payload = serde_json::from_str(r#"{"valor": 12.5, "quantidade": 3}"#).unwrap();
            assert_eq!(p.valor, 12.5);
            assert_eq!(p.quantidade, 3.0);
        }

        #[test]
        fn missing_fields_take_defaults() {
            let p: Payload = serde_json::from_str("{}").unwrap();
            assert_eq!(p.valor, 0.0);
            assert_eq!(p.quantidade, 1.0);
        }

        #[test]
        fn garbage_coerces_instead_of_failing() {
            let p: Payload =
                serde_json::from_str(r#"{"valor": "abc", "quantidade": null}"#).unwrap();
            assert_eq!(p.valor, 0.0);
            assert_eq!(p.quantidade, 1.0);
        }

        #[test]
        fn numeric_strings_parse() {
            let p: Payload = serde_json::from_str(r#"{"valor": "7.25"}"#).unwrap();
            assert_eq!(p.valor, 7.25);
        }

        #[derive(Deserialize)]
        struct Parcial {
            #[serde(default, deserialize_with = "super::opt_f64")]
            valor: Option<f64>,
        }

        #[test]
        fn optional_coercion_distinguishes_absent_from_set() {
            let p: Parcial = serde_json::from_str("{}").unwrap();
            assert_eq!(p.valor, None);

            let p: Parcial = serde_json::from_str(r#"{"valor": "10"}"#).unwrap();
            assert_eq!(p.valor, Some(10.0));

            let p: Parcial = serde_json::from_str(r#"{"valor": null}"#).unwrap();
            assert_eq!(p.valor, None);

            let p: Parcial = serde_json::from_str(r#"{"valor": "abc"}"#).unwrap();
            assert_eq!(p.valor, None);
        }
    }
}
