use swc_core::{
    common::{Span, Spanned, SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};
use tracing::trace;

use crate::error::{BemError, BemResult};
use crate::options::BemOptions;
use crate::token::{
    is_truthy_expr, key_value_prop, prop_key, prop_name_text, resolve_token_value, str_expr,
    str_lit, unwrap_parens, Token,
};

pub const CLASS_NAME_PROP: &str = "className";

/// Runtime joiner for dynamic class lists. Must be in scope in the output.
pub const CLASSNAMES_HELPER: &str = "classnames";

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

/// The block to build a class name from, or `None` when the node carries no
/// BEM attributes at all.
pub fn validate<'t>(
    block: Option<&'t Token>,
    element: Option<&Token>,
    modifiers: Option<&Expr>,
    span: Span,
) -> BemResult<Option<&'t Token>> {
    if let Some(block) = block.filter(|b| b.is_truthy()) {
        return Ok(Some(block));
    }
    if element.is_some_and(Token::is_truthy) {
        return Err(BemError::MissingBlock { span });
    }
    if modifiers.is_some_and(is_truthy_expr) {
        return Err(BemError::OrphanModifiers { span });
    }
    Ok(None)
}

// -----------------------------------------------------------------------------
// Class keys
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum PrefixPart {
    Text(String),
    Expr(Box<Expr>),
}

/// `blockPrefix + block [+ elementPrefix + element]`, kept in parts so that
/// dynamic blocks or elements can be concatenated at runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassPrefix {
    parts: Vec<PrefixPart>,
}

impl ClassPrefix {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(PrefixPart::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(PrefixPart::Text(text.to_string()));
        }
    }

    fn push_token(&mut self, token: &Token) {
        if let Token::Expr(expr) = token {
            self.parts.push(PrefixPart::Expr(expr.clone()));
        } else if let Some(text) = token.literal_text() {
            self.push_text(&text);
        }
    }

    pub fn static_text(&self) -> Option<String> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                PrefixPart::Text(text) => out.push_str(text),
                PrefixPart::Expr(_) => return None,
            }
        }
        Some(out)
    }

    /// The prefix followed by `suffix`.
    fn key(&self, suffix: &str) -> ClassKey {
        if let Some(mut text) = self.static_text() {
            text.push_str(suffix);
            return ClassKey::Static(text);
        }

        let mut operands: Vec<Expr> = self
            .parts
            .iter()
            .map(|part| match part {
                PrefixPart::Text(text) => str_expr(text.as_str()),
                PrefixPart::Expr(expr) => (**expr).clone(),
            })
            .collect();
        // `"" + expr` forces string concatenation
        if !matches!(self.parts.first(), Some(PrefixPart::Text(_))) {
            operands.insert(0, str_expr(""));
        }
        if !suffix.is_empty() {
            operands.push(str_expr(suffix));
        }
        let concat = operands
            .into_iter()
            .reduce(|left, right| {
                Expr::Bin(BinExpr {
                    span: DUMMY_SP,
                    op: BinaryOp::Add,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            })
            .unwrap_or_else(|| str_expr(""));
        ClassKey::Dynamic(Box::new(concat))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ClassKey {
    Static(String),
    Dynamic(Box<Expr>),
}

impl ClassKey {
    fn into_expr(self) -> Expr {
        match self {
            ClassKey::Static(text) => str_expr(text),
            ClassKey::Dynamic(expr) => *expr,
        }
    }

    fn into_prop_name(self) -> PropName {
        match self {
            ClassKey::Static(text) => PropName::Str(str_lit(text)),
            ClassKey::Dynamic(expr) => PropName::Computed(ComputedPropName {
                span: DUMMY_SP,
                expr,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ClassFragment {
    Always(ClassKey),
    /// Included by the runtime joiner only when the expression is truthy.
    When(ClassKey, Box<Expr>),
}

impl ClassFragment {
    fn into_expr(self) -> Expr {
        match self {
            ClassFragment::Always(key) => key.into_expr(),
            ClassFragment::When(key, test) => Expr::Object(ObjectLit {
                span: DUMMY_SP,
                props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                    key: key.into_prop_name(),
                    value: test,
                })))],
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Class names
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ClassName {
    Static(String),
    /// Arguments for a `classnames(...)` call.
    Dynamic(Vec<Expr>),
}

impl ClassName {
    fn from_fragments(fragments: Vec<ClassFragment>) -> Self {
        let texts: Option<Vec<&str>> = fragments
            .iter()
            .map(|fragment| match fragment {
                ClassFragment::Always(ClassKey::Static(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if let Some(texts) = texts {
            return ClassName::Static(texts.join(" "));
        }
        ClassName::Dynamic(fragments.into_iter().map(ClassFragment::into_expr).collect())
    }

    pub fn into_expr(self) -> Expr {
        match self {
            ClassName::Static(text) => str_expr(text),
            ClassName::Dynamic(args) => classnames_call(args),
        }
    }

    /// Computed names go first, the user's literal keeps its place at the end.
    pub fn prepend_to(self, original: &str) -> Expr {
        match self {
            ClassName::Static(text) => str_expr(format!("{} {}", text, original)),
            ClassName::Dynamic(mut args) => {
                args.push(str_expr(original));
                classnames_call(args)
            }
        }
    }
}

fn classnames_call(args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(Expr::Ident(Ident::new(
            CLASSNAMES_HELPER.into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        )))),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread {
                spread: None,
                expr: Box::new(expr),
            })
            .collect(),
        type_args: None,
        ctxt: SyntaxContext::empty(),
    })
}

// -----------------------------------------------------------------------------
// Resolver
// -----------------------------------------------------------------------------

pub struct ClassNameResolver<'a> {
    options: &'a BemOptions,
}

impl<'a> ClassNameResolver<'a> {
    pub fn new(options: &'a BemOptions) -> Self {
        Self { options }
    }

    pub fn prefix(&self, block: &Token, element: Option<&Token>) -> ClassPrefix {
        let mut prefix = ClassPrefix::default();
        prefix.push_text(&self.options.block_prefix);
        prefix.push_token(block);
        if let Some(element) = element.filter(|e| e.is_truthy()) {
            prefix.push_text(&self.options.element_prefix);
            prefix.push_token(element);
        }
        prefix
    }

    fn modifier_key(&self, prefix: &ClassPrefix, modifier: &str) -> ClassKey {
        prefix.key(&format!("{}{}", self.options.modifier_prefix, modifier))
    }

    pub fn expand_modifiers(
        &self,
        prefix: &ClassPrefix,
        modifiers: Option<&Expr>,
    ) -> BemResult<ClassName> {
        let mut fragments = vec![ClassFragment::Always(prefix.key(""))];

        let Some(modifiers) = modifiers.map(unwrap_parens).filter(|m| is_truthy_expr(m)) else {
            return Ok(ClassName::from_fragments(fragments));
        };

        match modifiers {
            Expr::Object(map) => {
                for prop in &map.props {
                    let PropOrSpread::Prop(prop) = prop else {
                        return Err(BemError::UnsupportedModifiersShape { span: prop.span() });
                    };
                    let (name, test) = match &**prop {
                        Prop::KeyValue(kv) => match prop_name_text(&kv.key) {
                            Some(name) => (name, kv.value.clone()),
                            None => {
                                return Err(BemError::UnsupportedModifiersShape {
                                    span: kv.key.span(),
                                })
                            }
                        },
                        Prop::Shorthand(ident) => {
                            (ident.sym.to_string(), Box::new(Expr::Ident(ident.clone())))
                        }
                        other => {
                            return Err(BemError::UnsupportedModifiersShape { span: other.span() })
                        }
                    };
                    let key = self.modifier_key(prefix, &name);
                    match unwrap_parens(&test) {
                        Expr::Lit(Lit::Bool(flag)) => {
                            if flag.value {
                                fragments.push(ClassFragment::Always(key));
                            }
                        }
                        _ => fragments.push(ClassFragment::When(key, test)),
                    }
                }
            }
            other => match resolve_token_value(other) {
                Token::Str(list) => {
                    fragments.extend(
                        list.split_whitespace()
                            .map(|modifier| ClassFragment::Always(self.modifier_key(prefix, modifier))),
                    );
                }
                _ => return Err(BemError::UnsupportedModifiersShape { span: other.span() }),
            },
        }

        Ok(ClassName::from_fragments(fragments))
    }

    /// Builds the BEM class name and merges it into the `className` property,
    /// appending one if the props have none.
    pub fn synthesize(
        &self,
        props: &mut ObjectLit,
        block: &Token,
        element: Option<&Token>,
        modifiers: Option<&Expr>,
    ) -> BemResult<()> {
        let prefix = self.prefix(block, element);
        let class_name = self.expand_modifiers(&prefix, modifiers)?;
        trace!(?class_name, "synthesized BEM class name");

        let existing = props
            .props
            .iter_mut()
            .find(|prop| prop_key(prop).as_deref() == Some(CLASS_NAME_PROP));

        let Some(existing) = existing else {
            props
                .props
                .push(key_value_prop(CLASS_NAME_PROP, class_name.into_expr()));
            return Ok(());
        };

        let span = existing.span();
        let PropOrSpread::Prop(prop) = existing else {
            return Err(BemError::UnsupportedClassName { span });
        };
        let Prop::KeyValue(kv) = &mut **prop else {
            return Err(BemError::UnsupportedClassName { span });
        };

        let original = match unwrap_parens(&kv.value) {
            Expr::Lit(Lit::Str(s)) => s.value.to_string(),
            other => return Err(BemError::UnsupportedClassName { span: other.span() }),
        };
        *kv.value = class_name.prepend_to(&original);
        Ok(())
    }
}
