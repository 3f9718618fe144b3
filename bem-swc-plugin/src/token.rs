use swc_core::{
    common::DUMMY_SP,
    ecma::ast::*,
};

// -----------------------------------------------------------------------------
// Tokens
// -----------------------------------------------------------------------------

/// A resolved `block` / `element` value.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Str(String),
    Bool(bool),
    /// Bare identifier, rendered as the `{name}` placeholder.
    Ref(String),
    /// Anything else; only known at runtime.
    Expr(Box<Expr>),
}

impl Token {
    pub fn is_truthy(&self) -> bool {
        match self {
            Token::Str(s) => !s.is_empty(),
            Token::Bool(b) => *b,
            Token::Ref(_) | Token::Expr(_) => true,
        }
    }

    /// Text the token contributes to a class name, `None` when dynamic.
    pub fn literal_text(&self) -> Option<String> {
        match self {
            Token::Str(s) => Some(s.clone()),
            Token::Bool(b) => Some(b.to_string()),
            Token::Ref(name) => Some(format!("{{{}}}", name)),
            Token::Expr(_) => None,
        }
    }

    pub fn to_expr(&self) -> Expr {
        match self {
            Token::Bool(b) => Expr::Lit(Lit::Bool(Bool {
                span: DUMMY_SP,
                value: *b,
            })),
            Token::Expr(expr) => (**expr).clone(),
            Token::Str(_) | Token::Ref(_) => str_expr(self.literal_text().unwrap_or_default()),
        }
    }
}

pub fn resolve_token_value(expr: &Expr) -> Token {
    match unwrap_parens(expr) {
        Expr::Lit(Lit::Str(s)) => Token::Str(s.value.to_string()),
        Expr::Lit(Lit::Bool(b)) => Token::Bool(b.value),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => match template_text(tpl) {
            Some(text) => Token::Str(text),
            None => Token::Expr(Box::new(Expr::Tpl(tpl.clone()))),
        },
        Expr::Ident(id) => Token::Ref(id.sym.to_string()),
        other => Token::Expr(Box::new(other.clone())),
    }
}

/// JS truthiness for the literal forms we can decide statically. Everything
/// else counts as truthy.
pub fn is_truthy_expr(expr: &Expr) -> bool {
    match unwrap_parens(expr) {
        Expr::Lit(Lit::Str(s)) => !s.value.is_empty(),
        Expr::Lit(Lit::Bool(b)) => b.value,
        Expr::Lit(Lit::Null(_)) => false,
        Expr::Lit(Lit::Num(n)) => n.value != 0.0 && !n.value.is_nan(),
        Expr::Ident(id) => id.sym.as_ref() != "undefined",
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            template_text(tpl).map_or(true, |text| !text.is_empty())
        }
        _ => true,
    }
}

/// Cooked text of a template without substitutions. `None` if any part has an
/// invalid escape.
fn template_text(tpl: &Tpl) -> Option<String> {
    tpl.quasis
        .iter()
        .map(|q| q.cooked.as_ref().map(|cooked| cooked.to_string()))
        .collect()
}

pub fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        other => other,
    }
}

pub fn unwrap_parens_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens_mut(&mut paren.expr),
        other => other,
    }
}

// -----------------------------------------------------------------------------
// Object literal properties
// -----------------------------------------------------------------------------

pub fn prop_name_text(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(i) => Some(i.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        PropName::Num(n) => Some(js_number_text(n.value)),
        PropName::Computed(_) | PropName::BigInt(_) => None,
    }
}

/// `Number.prototype.toString()` for the finite values a numeric key can hold.
fn js_number_text(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        // JS writes `1e+21` where Rust writes `1e21`
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    // -0 prints as "0" in JS
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Static key of a `key: value` or shorthand property.
pub fn prop_key(prop: &PropOrSpread) -> Option<String> {
    match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(kv) => prop_name_text(&kv.key),
            Prop::Shorthand(ident) => Some(ident.sym.to_string()),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

pub fn prop_value(prop: &PropOrSpread) -> Option<Expr> {
    match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(kv) => Some((*kv.value).clone()),
            Prop::Shorthand(ident) => Some(Expr::Ident(ident.clone())),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

/// `block`, `element` and `modifiers` as found on a props object.
#[derive(Debug, Default)]
pub struct BemAttrs {
    pub block: Option<Token>,
    pub element: Option<Token>,
    /// Kept as the raw node; modifiers are expanded from their syntax.
    pub modifiers: Option<Box<Expr>>,
}

impl BemAttrs {
    /// Reads `block` and `element`, leaving the props untouched.
    pub fn read(props: &ObjectLit) -> Self {
        let mut attrs = Self::default();
        for prop in &props.props {
            match prop_key(prop).as_deref() {
                Some("block") => attrs.block = prop_value(prop).map(|v| resolve_token_value(&v)),
                Some("element") => {
                    attrs.element = prop_value(prop).map(|v| resolve_token_value(&v))
                }
                _ => {}
            }
        }
        attrs
    }

    /// Removes `block`, `element` and `modifiers` from the props and returns them.
    pub fn consume(props: &mut ObjectLit) -> Self {
        let mut attrs = Self::default();
        props.props.retain(|prop| {
            match prop_key(prop).as_deref() {
                Some("block") => attrs.block = prop_value(prop).map(|v| resolve_token_value(&v)),
                Some("element") => {
                    attrs.element = prop_value(prop).map(|v| resolve_token_value(&v))
                }
                Some("modifiers") => attrs.modifiers = prop_value(prop).map(Box::new),
                _ => return true,
            }
            false
        });
        attrs
    }
}

// -----------------------------------------------------------------------------
// Node builders
// -----------------------------------------------------------------------------

pub fn str_lit(value: impl Into<String>) -> Str {
    let value: String = value.into();
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

pub fn str_expr(value: impl Into<String>) -> Expr {
    Expr::Lit(Lit::Str(str_lit(value)))
}

pub fn key_value_prop(key: &str, value: Expr) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key: PropName::Ident(IdentName::new(key.into(), DUMMY_SP)),
        value: Box::new(value),
    })))
}
