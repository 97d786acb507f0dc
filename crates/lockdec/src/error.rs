use thiserror::Error as ThisError;

///
/// DecError
///
/// Error surface for every fallible operation in the library. One variant
/// per kind; variants carry enough context (operation name, operand texts)
/// to reproduce the failure at the caller.
///
/// Nothing here is recovered internally. Arithmetic is deterministic, so
/// retrying an identical call is never meaningful.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecError {
    #[error("invalid decimal string: {text}")]
    InvalidDecString { text: String },

    #[error("infinite decimal string: {text}")]
    InfiniteString { text: String },

    /// An operand or result carried the poison tag where a finite value was
    /// required.
    #[error("not a number: {context}")]
    NaN { context: String },

    /// An exact operation lost precision under the wide context.
    #[error("unexpected rounding: {context}")]
    UnexpectedRounding { context: String },

    /// A fractional value was required to be a whole number.
    #[error("non-integral decimal: {text}")]
    NonIntegral { text: String },

    /// Magnitude exceeds a target integer type's range.
    #[error("overflow: {context}")]
    Overflow { context: String },

    #[error("out of range: {context}")]
    OutOfRange { context: String },

    /// Mismatched-length batch operation.
    #[error("mismatched lengths: {left} vs {right}")]
    NotMatchingLength { left: usize, right: usize },
}

impl DecError {
    pub(crate) fn invalid_string(text: impl Into<String>) -> Self {
        Self::InvalidDecString { text: text.into() }
    }

    pub(crate) fn infinite_string(text: impl Into<String>) -> Self {
        Self::InfiniteString { text: text.into() }
    }

    /// NaN operand on a binary operation.
    pub(crate) fn nan_operand2(op: &'static str, x: &impl ToString, y: &impl ToString) -> Self {
        Self::NaN {
            context: format!("{op}: {}, {}", x.to_string(), y.to_string()),
        }
    }

    /// NaN operand on a unary operation.
    pub(crate) fn nan_operand(op: &'static str, x: &impl ToString) -> Self {
        Self::NaN {
            context: format!("{op}: {}", x.to_string()),
        }
    }

    /// The arithmetic context signalled an invalid (non-finite) result.
    pub(crate) fn nan_result(context: impl Into<String>) -> Self {
        Self::NaN {
            context: context.into(),
        }
    }

    pub(crate) fn unexpected_rounding(context: impl Into<String>) -> Self {
        Self::UnexpectedRounding {
            context: context.into(),
        }
    }

    pub(crate) fn non_integral(text: impl Into<String>) -> Self {
        Self::NonIntegral { text: text.into() }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }

    pub(crate) fn out_of_range(context: impl Into<String>) -> Self {
        Self::OutOfRange {
            context: context.into(),
        }
    }
}
