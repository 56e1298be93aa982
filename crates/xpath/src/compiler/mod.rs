use crate::functions::CoreFunction;
use crate::model::ExpandedName;
use crate::parser::{ast, parse_xpath};
use crate::runtime::{Error, ErrorCode, StaticContext};

pub mod ir;

/// Parse and lower an expression. Prefixes are resolved here, so an unbound prefix or an unknown
/// function fails before any document is touched.
pub fn compile_expr(expr: &str, static_ctx: &StaticContext) -> Result<ir::ExprIR, Error> {
    let ast = parse_xpath(expr)?;
    let compiled = Compiler { static_ctx }.lower_expr(&ast)?;
    tracing::trace!(source = expr, "compiled xpath expression");
    Ok(compiled)
}

struct Compiler<'a> {
    static_ctx: &'a StaticContext,
}

type CResult<T> = Result<T, Error>;

impl Compiler<'_> {
    fn lower_expr(&self, e: &ast::Expr) -> CResult<ir::ExprIR> {
        use ast::Expr as E;
        Ok(match e {
            E::Literal(ast::Literal::String(s)) => ir::ExprIR::String(s.clone()),
            E::Literal(ast::Literal::Number(n)) => ir::ExprIR::Number(*n),
            E::Binary { op, left, right } => ir::ExprIR::Binary {
                op: *op,
                left: Box::new(self.lower_expr(left)?),
                right: Box::new(self.lower_expr(right)?),
            },
            E::Negate(inner) => ir::ExprIR::Negate(Box::new(self.lower_expr(inner)?)),
            E::Union(parts) => ir::ExprIR::Union(parts.iter().map(|p| self.lower_expr(p)).collect::<CResult<_>>()?),
            E::Filter { primary, predicates } => ir::ExprIR::Filter {
                input: Box::new(self.lower_expr(primary)?),
                predicates: self.lower_predicates(predicates)?,
            },
            E::Path(p) => self.lower_path(p)?,
            E::FunctionCall { name, args } => {
                let function = self.resolve_function(name, args.len())?;
                ir::ExprIR::Call { function, args: args.iter().map(|a| self.lower_expr(a)).collect::<CResult<_>>()? }
            }
        })
    }

    fn lower_predicates(&self, preds: &[ast::Expr]) -> CResult<ir::Predicates> {
        preds.iter().map(|p| self.lower_expr(p)).collect()
    }

    fn lower_path(&self, p: &ast::PathExpr) -> CResult<ir::ExprIR> {
        let start = match &p.start {
            ast::PathStart::Root => ir::PathStartIR::Root,
            ast::PathStart::Context => ir::PathStartIR::ContextItem,
            ast::PathStart::Expr(e) => ir::PathStartIR::Expr(Box::new(self.lower_expr(e)?)),
        };
        let steps = p
            .steps
            .iter()
            .map(|s| {
                Ok(ir::StepIR { axis: s.axis, test: self.lower_node_test(&s.test)?, predicates: self.lower_predicates(&s.predicates)? })
            })
            .collect::<CResult<_>>()?;
        Ok(ir::ExprIR::Path { start, steps })
    }

    fn lower_node_test(&self, t: &ast::NodeTest) -> CResult<ir::NodeTestIR> {
        Ok(match t {
            ast::NodeTest::AnyKind => ir::NodeTestIR::AnyKind,
            ast::NodeTest::Wildcard => ir::NodeTestIR::WildcardAny,
            ast::NodeTest::Text => ir::NodeTestIR::KindText,
            ast::NodeTest::Comment => ir::NodeTestIR::KindComment,
            ast::NodeTest::ProcessingInstruction(target) => ir::NodeTestIR::KindProcessingInstruction(target.clone()),
            ast::NodeTest::NsWildcard(prefix) => ir::NodeTestIR::NsWildcard(self.resolve_prefix(prefix)?.to_string()),
            ast::NodeTest::Name(name) => ir::NodeTestIR::Name(self.to_expanded(name)?),
        })
    }

    fn resolve_prefix(&self, prefix: &str) -> CResult<&str> {
        self.static_ctx
            .resolve_prefix(prefix)
            .ok_or_else(|| Error::from_code(ErrorCode::XPST0081, format!("namespace prefix '{prefix}' is not bound")))
    }

    fn to_expanded(&self, name: &ast::PrefixedName) -> CResult<ExpandedName> {
        let ns_uri = match &name.prefix {
            Some(p) => Some(self.resolve_prefix(p)?.to_string()),
            None => None,
        };
        Ok(ExpandedName::new(ns_uri, name.local.clone()))
    }

    fn resolve_function(&self, name: &ast::PrefixedName, argc: usize) -> CResult<CoreFunction> {
        let unknown = || {
            let shown = match &name.prefix {
                Some(p) => format!("{p}:{}", name.local),
                None => name.local.clone(),
            };
            Error::from_code(ErrorCode::XPST0017, format!("unknown function {shown}#{argc}"))
        };
        if let Some(p) = &name.prefix {
            self.resolve_prefix(p)?;
            return Err(unknown());
        }
        let function = CoreFunction::from_name(&name.local).ok_or_else(unknown)?;
        if !function.accepts_arity(argc) {
            return Err(unknown());
        }
        Ok(function)
    }
}
