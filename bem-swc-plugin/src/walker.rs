use swc_core::ecma::{
    ast::*,
    visit::{noop_visit_mut_type, VisitMut, VisitMutWith},
};
use tracing::{debug, trace};

use crate::error::{BemError, BemResult};
use crate::options::BemOptions;
use crate::resolver::{validate, ClassNameResolver};
use crate::token::{key_value_prop, unwrap_parens, unwrap_parens_mut, BemAttrs, Token};

/// `React.createElement(...)`
pub fn is_element_factory_call(call: &CallExpr) -> bool {
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Member(m) = &**callee else {
        return false;
    };
    if let (Expr::Ident(obj), MemberProp::Ident(prop)) = (&*m.obj, &m.prop) {
        return obj.sym.as_ref() == "React" && prop.sym.as_ref() == "createElement";
    }
    false
}

fn call_expr_mut(expr: &mut Expr) -> Option<&mut CallExpr> {
    match unwrap_parens_mut(expr) {
        Expr::Call(call) => Some(call),
        _ => None,
    }
}

fn object_lit_mut(arg: &mut ExprOrSpread) -> Option<&mut ObjectLit> {
    if arg.spread.is_some() {
        return None;
    }
    match unwrap_parens_mut(&mut arg.expr) {
        Expr::Object(obj) => Some(obj),
        _ => None,
    }
}

/// A bare name as the element type means a component rather than a tag.
fn is_component_reference(arg: &ExprOrSpread) -> bool {
    arg.spread.is_none() && matches!(unwrap_parens(&arg.expr), Expr::Ident(_))
}

// -----------------------------------------------------------------------------
// Tree walker
// -----------------------------------------------------------------------------

pub struct TreeWalker<'a> {
    resolver: ClassNameResolver<'a>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(options: &'a BemOptions) -> Self {
        Self {
            resolver: ClassNameResolver::new(options),
        }
    }

    /// Rewrites one element-factory call and everything below it.
    /// `ancestor_block` is the nearest enclosing block, if any.
    pub fn walk(&self, ancestor_block: Option<&Token>, call: &mut CallExpr) -> BemResult<()> {
        if !is_element_factory_call(call) {
            return Ok(());
        }
        let span = call.span;

        let Some((type_arg, rest)) = call.args.split_first_mut() else {
            return Ok(());
        };
        let Some((props_arg, children)) = rest.split_first_mut() else {
            return Ok(());
        };
        let Some(props) = object_lit_mut(props_arg) else {
            return self.walk_children(ancestor_block, children);
        };

        if is_component_reference(type_arg) {
            // The component renders its own class name; it only needs the block.
            let attrs = BemAttrs::read(props);
            let own_block = attrs.block.filter(Token::is_truthy);
            if own_block.is_none() && attrs.element.as_ref().is_some_and(Token::is_truthy) {
                let Some(ancestor) = ancestor_block else {
                    return Err(BemError::MissingBlock { span });
                };
                debug!(block = ?ancestor, "passing ancestor block to component");
                props.props.insert(0, key_value_prop("block", ancestor.to_expr()));
            }
            return self.walk_children(own_block.as_ref().or(ancestor_block), children);
        }

        let attrs = BemAttrs::consume(props);
        let block = attrs
            .block
            .filter(Token::is_truthy)
            .or_else(|| ancestor_block.cloned());

        self.walk_children(block.as_ref(), children)?;

        let element = attrs.element.filter(Token::is_truthy);
        let modifiers = attrs.modifiers.as_deref();
        match validate(block.as_ref(), element.as_ref(), modifiers, span)? {
            Some(block) => self
                .resolver
                .synthesize(props, block, element.as_ref(), modifiers),
            None => Ok(()),
        }
    }

    fn walk_children(
        &self,
        ancestor_block: Option<&Token>,
        children: &mut [ExprOrSpread],
    ) -> BemResult<()> {
        for child in children.iter_mut().filter(|c| c.spread.is_none()) {
            if let Some(call) = call_expr_mut(&mut child.expr) {
                self.walk(ancestor_block, call)?;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Visitor: element trees returned from render functions
// -----------------------------------------------------------------------------

pub struct BemTransform<'a> {
    walker: TreeWalker<'a>,
    error: Option<BemError>,
}

impl<'a> BemTransform<'a> {
    pub fn new(options: &'a BemOptions) -> Self {
        Self {
            walker: TreeWalker::new(options),
            error: None,
        }
    }

    pub fn into_result(self) -> BemResult<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl VisitMut for BemTransform<'_> {
    noop_visit_mut_type!();

    fn visit_mut_return_stmt(&mut self, n: &mut ReturnStmt) {
        if self.error.is_some() {
            return;
        }
        if let Some(call) = n.arg.as_deref_mut().and_then(call_expr_mut) {
            trace!(span = ?call.span, "walking returned element tree");
            if let Err(err) = self.walker.walk(None, call) {
                debug!(%err, "BEM transform failed");
                self.error = Some(err);
                return;
            }
        }
        // nested functions may return trees of their own
        n.visit_mut_children_with(self);
    }
}
