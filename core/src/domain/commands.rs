//! Domain-level query types.
//!
//! These structs are used by services inside the domain layer. The caller
//! (chat UI, statement view) maps its own input into these before invoking a
//! service; in particular the reference instant is always supplied by the
//! caller, never read from the system clock, to keep the domain layer
//! deterministic.

pub mod reports {
    use chrono::NaiveDateTime;

    /// A free-text period question, e.g. "¿Cuánto gasté esta semana?".
    #[derive(Debug, Clone)]
    pub struct PeriodQuery {
        /// Raw user input; normalisation happens inside the parser
        pub text: String,
        /// The "now" every relative expression is resolved against
        pub reference: NaiveDateTime,
    }
}
