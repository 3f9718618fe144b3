use swc_core::common::{errors::HANDLER, Span};
use thiserror::Error;

pub type BemResult<T> = Result<T, BemError>;

/// Malformed BEM usage found on a single node. Any of these aborts the
/// transform of the current program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BemError {
    #[error("BEM element must have an ancestor block")]
    MissingBlock { span: Span },

    #[error("BEM modifiers must be attached to a block or an element")]
    OrphanModifiers { span: Span },

    #[error("Unsupported className for BEM block or element")]
    UnsupportedClassName { span: Span },

    #[error("Unsupported value for BEM modifiers")]
    UnsupportedModifiersShape { span: Span },
}

impl BemError {
    pub fn span(&self) -> Span {
        match self {
            Self::MissingBlock { span }
            | Self::OrphanModifiers { span }
            | Self::UnsupportedClassName { span }
            | Self::UnsupportedModifiersShape { span } => *span,
        }
    }

    /// Report through the host's diagnostic handler. Only valid while a
    /// `HANDLER` is set, which the plugin runtime guarantees.
    pub fn emit(&self) {
        HANDLER.with(|handler| {
            handler
                .struct_span_err(self.span(), &self.to_string())
                .emit()
        });
    }
}
