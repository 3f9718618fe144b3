//! SWC plugin that turns `block` / `element` / `modifiers` props on
//! `React.createElement` calls into BEM `className`s.
//!
//! ```js
//! return React.createElement("div", { block: "card", modifiers: "active" },
//!   React.createElement("h2", { element: "title" }));
//! // becomes
//! return React.createElement("div", { className: "card card--active" },
//!   React.createElement("h2", { className: "card__title" }));
//! ```
//!
//! Modifiers with runtime values produce a `classnames(...)` call; the host is
//! expected to have `classnames` in scope.

use swc_core::{
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

pub mod error;
pub mod options;
pub mod resolver;
pub mod token;
pub mod walker;


pub use error::{BemError, BemResult};
pub use options::BemOptions;
pub use walker::{BemTransform, TreeWalker};

/// Rewrites every element tree returned from a function in `program`. Stops at
/// the first malformed BEM usage.
pub fn transform_program(program: &mut Program, options: &BemOptions) -> BemResult<()> {
    let mut transform = BemTransform::new(options);
    program.visit_mut_with(&mut transform);
    transform.into_result()
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let options = metadata
        .get_transform_plugin_config()
        .map(|config| BemOptions::from_json_or_default(&config))
        .unwrap_or_default();

    if let Err(err) = transform_program(&mut program, &options) {
        err.emit();
    }

    program
}
