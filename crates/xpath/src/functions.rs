//! The XPath 1.0 core function library.
use crate::evaluator::Focus;
use crate::model::XdmNode;
use crate::runtime::{Error, ErrorCode};
use crate::xdm::{XdmValue, number_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreFunction {
    Last,
    Position,
    Count,
    LocalName,
    NamespaceUri,
    Name,
    String,
    Concat,
    StartsWith,
    Contains,
    SubstringBefore,
    SubstringAfter,
    Substring,
    StringLength,
    NormalizeSpace,
    Translate,
    Not,
    True,
    False,
    Boolean,
    Number,
    Sum,
    Floor,
    Ceiling,
    Round,
}

impl CoreFunction {
    pub fn from_name(local: &str) -> Option<Self> {
        use CoreFunction::*;
        Some(match local {
            "last" => Last,
            "position" => Position,
            "count" => Count,
            "local-name" => LocalName,
            "namespace-uri" => NamespaceUri,
            "name" => Name,
            "string" => String,
            "concat" => Concat,
            "starts-with" => StartsWith,
            "contains" => Contains,
            "substring-before" => SubstringBefore,
            "substring-after" => SubstringAfter,
            "substring" => Substring,
            "string-length" => StringLength,
            "normalize-space" => NormalizeSpace,
            "translate" => Translate,
            "not" => Not,
            "true" => True,
            "false" => False,
            "boolean" => Boolean,
            "number" => Number,
            "sum" => Sum,
            "floor" => Floor,
            "ceiling" => Ceiling,
            "round" => Round,
            _ => return None,
        })
    }

    /// Inclusive arity bounds; `None` means unbounded.
    pub fn arity(self) -> (usize, Option<usize>) {
        use CoreFunction::*;
        match self {
            Last | Position | True | False => (0, Some(0)),
            LocalName | NamespaceUri | Name | String | StringLength | NormalizeSpace | Number => (0, Some(1)),
            Count | Not | Boolean | Sum | Floor | Ceiling | Round => (1, Some(1)),
            StartsWith | Contains | SubstringBefore | SubstringAfter => (2, Some(2)),
            Substring => (2, Some(3)),
            Translate => (3, Some(3)),
            Concat => (2, None),
        }
    }

    pub fn accepts_arity(self, argc: usize) -> bool {
        let (min, max) = self.arity();
        argc >= min && max.is_none_or(|m| argc <= m)
    }
}

fn node_set_arg<N: XdmNode>(f: CoreFunction, v: XdmValue<N>) -> Result<Vec<N>, Error> {
    let type_name = v.type_name();
    v.into_nodes().ok_or_else(|| {
        Error::from_code(ErrorCode::XPTY0004, format!("{f:?} expects a node-set argument, got {type_name}"))
    })
}

/// The node a name function applies to: the first node of the argument, or the context node.
fn name_target<N: XdmNode>(f: CoreFunction, focus: &Focus<N>, args: Vec<XdmValue<N>>) -> Result<Option<N>, Error> {
    match args.into_iter().next() {
        Some(v) => Ok(node_set_arg(f, v)?.into_iter().next()),
        None => Ok(Some(focus.item.clone())),
    }
}

fn string_arg<N: XdmNode>(focus: &Focus<N>, args: &[XdmValue<N>], i: usize) -> String {
    match args.get(i) {
        Some(v) => v.to_string_value(),
        None => focus.item.string_value(),
    }
}

fn xpath_round(v: f64) -> f64 {
    if v.is_nan() || v.is_infinite() {
        return v;
    }
    let r = (v + 0.5).floor();
    if r == 0.0 && v < 0.0 { -0.0 } else { r }
}

pub(crate) fn call<N: XdmNode>(f: CoreFunction, focus: &Focus<N>, args: Vec<XdmValue<N>>) -> Result<XdmValue<N>, Error> {
    use CoreFunction as F;
    Ok(match f {
        F::Last => XdmValue::Number(focus.size as f64),
        F::Position => XdmValue::Number(focus.position as f64),
        F::Count => {
            let arg = args.into_iter().next().unwrap_or(XdmValue::NodeSet(Vec::new()));
            XdmValue::Number(node_set_arg(f, arg)?.len() as f64)
        }
        F::LocalName => {
            let n = name_target(f, focus, args)?;
            XdmValue::String(n.and_then(|n| n.name()).map(|q| q.local).unwrap_or_default())
        }
        F::NamespaceUri => {
            let n = name_target(f, focus, args)?;
            XdmValue::String(n.and_then(|n| n.name()).and_then(|q| q.ns_uri).unwrap_or_default())
        }
        F::Name => {
            let n = name_target(f, focus, args)?;
            XdmValue::String(n.and_then(|n| n.name()).map(|q| q.to_string()).unwrap_or_default())
        }
        F::String => XdmValue::String(string_arg(focus, &args, 0)),
        F::Concat => XdmValue::String(args.iter().map(XdmValue::to_string_value).collect()),
        F::StartsWith => XdmValue::Boolean(args[0].to_string_value().starts_with(&args[1].to_string_value())),
        F::Contains => XdmValue::Boolean(args[0].to_string_value().contains(&args[1].to_string_value())),
        F::SubstringBefore => {
            let s = args[0].to_string_value();
            let sep = args[1].to_string_value();
            XdmValue::String(s.find(&sep).map(|i| s[..i].to_string()).unwrap_or_default())
        }
        F::SubstringAfter => {
            let s = args[0].to_string_value();
            let sep = args[1].to_string_value();
            XdmValue::String(s.find(&sep).map(|i| s[i + sep.len()..].to_string()).unwrap_or_default())
        }
        F::Substring => {
            let s = args[0].to_string_value();
            let start = xpath_round(args[1].to_number());
            let end = match args.get(2) {
                Some(len) => start + xpath_round(len.to_number()),
                None => f64::INFINITY,
            };
            let out = s
                .chars()
                .enumerate()
                .filter(|(i, _)| {
                    let p = (*i + 1) as f64;
                    p >= start && p < end
                })
                .map(|(_, c)| c)
                .collect();
            XdmValue::String(out)
        }
        F::StringLength => XdmValue::Number(string_arg(focus, &args, 0).chars().count() as f64),
        F::NormalizeSpace => {
            let s = string_arg(focus, &args, 0);
            XdmValue::String(s.split(|c| matches!(c, ' ' | '\t' | '\r' | '\n')).filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        }
        F::Translate => {
            let s = args[0].to_string_value();
            let from: Vec<char> = args[1].to_string_value().chars().collect();
            let to: Vec<char> = args[2].to_string_value().chars().collect();
            let out = s
                .chars()
                .filter_map(|c| match from.iter().position(|&x| x == c) {
                    Some(i) => to.get(i).copied(),
                    None => Some(c),
                })
                .collect();
            XdmValue::String(out)
        }
        F::Not => XdmValue::Boolean(!args[0].to_boolean()),
        F::True => XdmValue::Boolean(true),
        F::False => XdmValue::Boolean(false),
        F::Boolean => XdmValue::Boolean(args[0].to_boolean()),
        F::Number => match args.first() {
            Some(v) => XdmValue::Number(v.to_number()),
            None => XdmValue::Number(crate::xdm::string_to_number(&focus.item.string_value())),
        },
        F::Sum => {
            let arg = args.into_iter().next().unwrap_or(XdmValue::NodeSet(Vec::new()));
            let total = node_set_arg(f, arg)?.iter().map(|n| crate::xdm::string_to_number(&n.string_value())).sum();
            XdmValue::Number(total)
        }
        F::Floor => XdmValue::Number(args[0].to_number().floor()),
        F::Ceiling => XdmValue::Number(args[0].to_number().ceil()),
        F::Round => XdmValue::Number(xpath_round(args[0].to_number())),
    })
}

/// Short rendering of a value for trace output.
pub(crate) fn describe<N: XdmNode>(v: &XdmValue<N>) -> String {
    match v {
        XdmValue::NodeSet(n) => format!("node-set({})", n.len()),
        XdmValue::Number(x) => number_to_string(*x),
        XdmValue::String(s) => format!("{s:?}"),
        XdmValue::Boolean(b) => b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.5, 3.0)]
    #[case(-2.5, -2.0)]
    #[case(-0.2, -0.0)]
    #[case(1.49, 1.0)]
    fn rounding(#[case] v: f64, #[case] expected: f64) {
        assert_eq!(xpath_round(v), expected);
    }

    #[test]
    fn arity_bounds() {
        assert!(CoreFunction::Concat.accepts_arity(5));
        assert!(!CoreFunction::Concat.accepts_arity(1));
        assert!(CoreFunction::Substring.accepts_arity(3));
        assert!(!CoreFunction::True.accepts_arity(1));
    }
}
