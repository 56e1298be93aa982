use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;

use crate::runtime::{Error, ErrorCode};

pub mod ast;

#[derive(pest_derive::Parser)]
#[grammar = "xpath.pest"]
pub struct XPathParser;

/// Parse an expression into its syntax tree. Grammar violations are `err:XPST0003`.
pub fn parse_xpath(input: &str) -> Result<ast::Expr, Error> {
    let mut pairs = XPathParser::parse(Rule::xpath, input).map_err(|e| {
        let col = match e.line_col {
            LineColLocation::Pos((_, c)) | LineColLocation::Span((_, c), _) => c,
        };
        Error::from_code(ErrorCode::XPST0003, format!("invalid expression at column {col}: {}", e.variant.message()))
    })?;
    let root = pairs.next().ok_or_else(|| malformed("empty parse"))?;
    let expr = root.into_inner().next().ok_or_else(|| malformed("missing expression"))?;
    build_expr(expr)
}

fn malformed(what: &str) -> Error {
    Error::from_code(ErrorCode::XPST0003, format!("malformed expression: {what}"))
}

fn first_inner(pair: Pair<'_, Rule>) -> Result<Pair<'_, Rule>, Error> {
    let rule = pair.as_rule();
    pair.into_inner().next().ok_or_else(|| malformed(&format!("{rule:?} without content")))
}

fn build_expr(pair: Pair<'_, Rule>) -> Result<ast::Expr, Error> {
    match pair.as_rule() {
        Rule::expr | Rule::primary_expr | Rule::path_expr | Rule::parenthesized_expr => build_expr(first_inner(pair)?),
        Rule::or_expr => fold_binary(pair, |_| Some(ast::BinaryOp::Or)),
        Rule::and_expr => fold_binary(pair, |_| Some(ast::BinaryOp::And)),
        Rule::equality_expr => fold_binary(pair, |op| match op {
            "=" => Some(ast::BinaryOp::Eq),
            "!=" => Some(ast::BinaryOp::Ne),
            _ => None,
        }),
        Rule::relational_expr => fold_binary(pair, |op| match op {
            "<" => Some(ast::BinaryOp::Lt),
            "<=" => Some(ast::BinaryOp::Le),
            ">" => Some(ast::BinaryOp::Gt),
            ">=" => Some(ast::BinaryOp::Ge),
            _ => None,
        }),
        Rule::additive_expr => fold_binary(pair, |op| match op {
            "+" => Some(ast::BinaryOp::Add),
            "-" => Some(ast::BinaryOp::Sub),
            _ => None,
        }),
        Rule::multiplicative_expr => fold_binary(pair, |op| match op {
            "*" => Some(ast::BinaryOp::Mul),
            "div" => Some(ast::BinaryOp::Div),
            "mod" => Some(ast::BinaryOp::Mod),
            _ => None,
        }),
        Rule::unary_expr => {
            let mut negations = 0usize;
            let mut operand = None;
            for p in pair.into_inner() {
                match p.as_rule() {
                    Rule::minus => negations += 1,
                    _ => operand = Some(build_expr(p)?),
                }
            }
            let mut expr = operand.ok_or_else(|| malformed("unary operator without operand"))?;
            for _ in 0..negations {
                expr = ast::Expr::Negate(Box::new(expr));
            }
            Ok(expr)
        }
        Rule::union_expr => {
            let mut parts = pair.into_inner().map(build_expr).collect::<Result<Vec<_>, _>>()?;
            if parts.len() == 1 {
                parts.pop().ok_or_else(|| malformed("empty union"))
            } else {
                Ok(ast::Expr::Union(parts))
            }
        }
        Rule::filter_path => {
            let mut inner = pair.into_inner();
            let filter = build_expr(inner.next().ok_or_else(|| malformed("missing filter"))?)?;
            match inner.next() {
                None => Ok(filter),
                Some(sep) => {
                    let mut steps = Vec::new();
                    if sep.as_str() == "//" {
                        steps.push(ast::Step::descendant_or_self_node());
                    }
                    let rel = inner.next().ok_or_else(|| malformed("path separator without step"))?;
                    build_relative_steps(rel, &mut steps)?;
                    Ok(ast::Expr::Path(ast::PathExpr { start: ast::PathStart::Expr(Box::new(filter)), steps }))
                }
            }
        }
        Rule::filter_expr => {
            let mut inner = pair.into_inner();
            let primary = build_expr(inner.next().ok_or_else(|| malformed("missing primary"))?)?;
            let predicates = inner.map(build_predicate).collect::<Result<Vec<_>, _>>()?;
            if predicates.is_empty() {
                Ok(primary)
            } else {
                Ok(ast::Expr::Filter { primary: Box::new(primary), predicates })
            }
        }
        Rule::absolute_path => {
            let mut inner = pair.into_inner();
            let sep = inner.next().ok_or_else(|| malformed("missing separator"))?;
            let mut steps = Vec::new();
            let rel = inner.next();
            if sep.as_str() == "//" {
                if rel.is_none() {
                    return Err(malformed("'//' must be followed by a step"));
                }
                steps.push(ast::Step::descendant_or_self_node());
            }
            if let Some(rel) = rel {
                build_relative_steps(rel, &mut steps)?;
            }
            Ok(ast::Expr::Path(ast::PathExpr { start: ast::PathStart::Root, steps }))
        }
        Rule::relative_path => {
            let mut steps = Vec::new();
            build_relative_steps(pair, &mut steps)?;
            Ok(ast::Expr::Path(ast::PathExpr { start: ast::PathStart::Context, steps }))
        }
        Rule::function_call => {
            let mut inner = pair.into_inner();
            let name = inner.next().ok_or_else(|| malformed("missing function name"))?;
            let args = inner.map(build_expr).collect::<Result<Vec<_>, _>>()?;
            Ok(ast::Expr::FunctionCall { name: ast::PrefixedName::parse(name.as_str()), args })
        }
        Rule::string_literal => Ok(ast::Expr::Literal(ast::Literal::String(string_literal(pair)))),
        Rule::number => {
            let v = pair.as_str().parse::<f64>().map_err(|_| malformed("invalid number"))?;
            Ok(ast::Expr::Literal(ast::Literal::Number(v)))
        }
        other => Err(malformed(&format!("unexpected {other:?}"))),
    }
}

fn fold_binary(pair: Pair<'_, Rule>, op_of: impl Fn(&str) -> Option<ast::BinaryOp>) -> Result<ast::Expr, Error> {
    let mut inner = pair.into_inner();
    let mut left = build_expr(inner.next().ok_or_else(|| malformed("missing operand"))?)?;
    while let Some(op_pair) = inner.next() {
        let op = op_of(op_pair.as_str().trim()).ok_or_else(|| malformed("unknown operator"))?;
        let right = build_expr(inner.next().ok_or_else(|| malformed("missing right operand"))?)?;
        left = ast::Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
    }
    Ok(left)
}

fn build_predicate(pair: Pair<'_, Rule>) -> Result<ast::Expr, Error> {
    build_expr(first_inner(pair)?)
}

fn build_relative_steps(pair: Pair<'_, Rule>, steps: &mut Vec<ast::Step>) -> Result<(), Error> {
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::path_sep => {
                if p.as_str() == "//" {
                    steps.push(ast::Step::descendant_or_self_node());
                }
            }
            Rule::step => steps.push(build_step(p)?),
            other => return Err(malformed(&format!("unexpected {other:?} in path"))),
        }
    }
    Ok(())
}

fn build_step(pair: Pair<'_, Rule>) -> Result<ast::Step, Error> {
    let inner = first_inner(pair)?;
    if inner.as_rule() == Rule::abbrev_step {
        let axis = if inner.as_str() == ".." { ast::Axis::Parent } else { ast::Axis::SelfAxis };
        return Ok(ast::Step { axis, test: ast::NodeTest::AnyKind, predicates: Vec::new() });
    }
    let mut axis = ast::Axis::Child;
    let mut test = None;
    let mut predicates = Vec::new();
    for p in inner.into_inner() {
        match p.as_rule() {
            Rule::axis_specifier => {
                let spec = first_inner(p)?;
                axis = match spec.as_rule() {
                    Rule::abbrev_attribute => ast::Axis::Attribute,
                    _ => ast::Axis::from_name(spec.as_str()).ok_or_else(|| malformed("unknown axis"))?,
                };
            }
            Rule::node_test => test = Some(build_node_test(p)?),
            Rule::predicate => predicates.push(build_predicate(p)?),
            other => return Err(malformed(&format!("unexpected {other:?} in step"))),
        }
    }
    let test = test.ok_or_else(|| malformed("step without node test"))?;
    Ok(ast::Step { axis, test, predicates })
}

fn build_node_test(pair: Pair<'_, Rule>) -> Result<ast::NodeTest, Error> {
    let inner = first_inner(pair)?;
    match inner.as_rule() {
        Rule::kind_test => {
            let mut parts = inner.into_inner();
            let kind = parts.next().ok_or_else(|| malformed("missing kind"))?;
            let arg = parts.next().map(string_literal);
            Ok(match kind.as_str() {
                "node" => ast::NodeTest::AnyKind,
                "text" => ast::NodeTest::Text,
                "comment" => ast::NodeTest::Comment,
                _ => ast::NodeTest::ProcessingInstruction(arg),
            })
        }
        Rule::name_test => {
            let t = first_inner(inner)?;
            Ok(match t.as_rule() {
                Rule::wildcard => ast::NodeTest::Wildcard,
                Rule::ns_wildcard => ast::NodeTest::NsWildcard(t.as_str().trim_end_matches(":*").to_string()),
                _ => ast::NodeTest::Name(ast::PrefixedName::parse(t.as_str())),
            })
        }
        other => Err(malformed(&format!("unexpected {other:?} as node test"))),
    }
}

fn string_literal(pair: Pair<'_, Rule>) -> String {
    pair.into_inner().next().map(|p| p.as_str().to_string()).unwrap_or_default()
}
