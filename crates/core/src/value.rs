//! Typed attribute values and bags.
use core::fmt;
use core::str::FromStr;

use num_bigint::BigInt;
use xacml_xpath::StaticContext;

use crate::datatype::DataType;
use crate::datatypes::{
    AnyUri, Base64Binary, Date, DateTime, DayTimeDuration, DnsName, HexBinary, IpAddress, ParseError,
    Rfc822Name, Time, X500Name, XPathValue, YearMonthDuration, format_double, parse_boolean, parse_double,
    parse_integer,
};

/// A single value tagged with its datatype. The variant is the tag, so the two always agree.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Integer(BigInt),
    Double(f64),
    Time(Time),
    Date(Date),
    DateTime(DateTime),
    AnyUri(AnyUri),
    HexBinary(HexBinary),
    Base64Binary(Base64Binary),
    DayTimeDuration(DayTimeDuration),
    YearMonthDuration(YearMonthDuration),
    X500Name(X500Name),
    Rfc822Name(Rfc822Name),
    IpAddress(IpAddress),
    DnsName(DnsName),
    XPathExpression(XPathValue),
}

/// Canonical lexical form of a payload type.
pub trait Lexical: Sized {
    fn parse_lexical(s: &str) -> Result<Self, ParseError>;
    fn to_lexical(&self) -> String;
}

impl Lexical for String {
    fn parse_lexical(s: &str) -> Result<Self, ParseError> {
        Ok(s.to_string())
    }

    fn to_lexical(&self) -> String {
        self.clone()
    }
}

impl Lexical for bool {
    fn parse_lexical(s: &str) -> Result<Self, ParseError> {
        parse_boolean(s)
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

impl Lexical for BigInt {
    fn parse_lexical(s: &str) -> Result<Self, ParseError> {
        parse_integer(s)
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

impl Lexical for f64 {
    fn parse_lexical(s: &str) -> Result<Self, ParseError> {
        parse_double(s)
    }

    fn to_lexical(&self) -> String {
        format_double(*self)
    }
}

macro_rules! lexical_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl Lexical for $t {
                fn parse_lexical(s: &str) -> Result<Self, ParseError> {
                    <$t as FromStr>::from_str(s)
                }

                fn to_lexical(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

lexical_via_from_str!(
    Time,
    Date,
    DateTime,
    AnyUri,
    HexBinary,
    Base64Binary,
    DayTimeDuration,
    YearMonthDuration,
    X500Name,
    Rfc822Name,
    IpAddress,
    DnsName,
);

/// Payload types that map to exactly one [`DataType`].
pub trait TypedValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    fn from_value(value: &AttributeValue) -> Option<&Self>;

    fn into_value(self) -> AttributeValue;
}

macro_rules! typed_values {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl TypedValue for $t {
                const DATA_TYPE: DataType = DataType::$variant;

                fn from_value(value: &AttributeValue) -> Option<&Self> {
                    match value {
                        AttributeValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn into_value(self) -> AttributeValue {
                    AttributeValue::$variant(self)
                }
            }
        )*

        impl AttributeValue {
            pub fn data_type(&self) -> DataType {
                match self {
                    $(AttributeValue::$variant(_) => DataType::$variant,)*
                }
            }
        }
    };
}

typed_values! {
    String => String,
    bool => Boolean,
    BigInt => Integer,
    f64 => Double,
    Time => Time,
    Date => Date,
    DateTime => DateTime,
    AnyUri => AnyUri,
    HexBinary => HexBinary,
    Base64Binary => Base64Binary,
    DayTimeDuration => DayTimeDuration,
    YearMonthDuration => YearMonthDuration,
    X500Name => X500Name,
    Rfc822Name => Rfc822Name,
    IpAddress => IpAddress,
    DnsName => DnsName,
    XPathValue => XPathExpression,
}

fn lexical<T: Lexical + TypedValue>(s: &str) -> Result<AttributeValue, ParseError> {
    T::parse_lexical(s).map(TypedValue::into_value)
}

impl AttributeValue {
    /// Parse `text` in the lexical space of `data_type`. An `xpathExpression` parsed this way
    /// has no category and uses no namespace bindings.
    pub fn parse(data_type: DataType, text: &str) -> Result<Self, ParseError> {
        match data_type {
            DataType::String => lexical::<String>(text),
            DataType::Boolean => lexical::<bool>(text),
            DataType::Integer => lexical::<BigInt>(text),
            DataType::Double => lexical::<f64>(text),
            DataType::Time => lexical::<Time>(text),
            DataType::Date => lexical::<Date>(text),
            DataType::DateTime => lexical::<DateTime>(text),
            DataType::AnyUri => lexical::<AnyUri>(text),
            DataType::HexBinary => lexical::<HexBinary>(text),
            DataType::Base64Binary => lexical::<Base64Binary>(text),
            DataType::DayTimeDuration => lexical::<DayTimeDuration>(text),
            DataType::YearMonthDuration => lexical::<YearMonthDuration>(text),
            DataType::X500Name => lexical::<X500Name>(text),
            DataType::Rfc822Name => lexical::<Rfc822Name>(text),
            DataType::IpAddress => lexical::<IpAddress>(text),
            DataType::DnsName => lexical::<DnsName>(text),
            DataType::XPathExpression => {
                Ok(AttributeValue::XPathExpression(XPathValue::new(text, None, &StaticContext::default())))
            }
        }
    }

    pub fn get<T: TypedValue>(&self) -> Option<&T> {
        T::from_value(self)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(BigInt::from(i))
    }
}

impl From<f64> for AttributeValue {
    fn from(d: f64) -> Self {
        AttributeValue::Double(d)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(v) => f.write_str(v),
            AttributeValue::Boolean(v) => write!(f, "{v}"),
            AttributeValue::Integer(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => f.write_str(&format_double(*v)),
            AttributeValue::Time(v) => write!(f, "{v}"),
            AttributeValue::Date(v) => write!(f, "{v}"),
            AttributeValue::DateTime(v) => write!(f, "{v}"),
            AttributeValue::AnyUri(v) => write!(f, "{v}"),
            AttributeValue::HexBinary(v) => write!(f, "{v}"),
            AttributeValue::Base64Binary(v) => write!(f, "{v}"),
            AttributeValue::DayTimeDuration(v) => write!(f, "{v}"),
            AttributeValue::YearMonthDuration(v) => write!(f, "{v}"),
            AttributeValue::X500Name(v) => write!(f, "{v}"),
            AttributeValue::Rfc822Name(v) => write!(f, "{v}"),
            AttributeValue::IpAddress(v) => write!(f, "{v}"),
            AttributeValue::DnsName(v) => write!(f, "{v}"),
            AttributeValue::XPathExpression(v) => write!(f, "{v}"),
        }
    }
}

/// Ordered, duplicate-permitting sequence of values. Elements may differ in datatype.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bag(Vec<AttributeValue>);

impl Bag {
    pub fn new(values: Vec<AttributeValue>) -> Self {
        Self(values)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn of<T: TypedValue>(values: impl IntoIterator<Item = T>) -> Self {
        values.into_iter().map(TypedValue::into_value).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.0.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, AttributeValue> {
        self.0.iter()
    }

    pub fn contains(&self, value: &AttributeValue) -> bool {
        self.0.contains(value)
    }

    /// Elements of type `T`, skipping any of another datatype.
    pub fn typed<T: TypedValue>(&self) -> impl Iterator<Item = &T> {
        self.0.iter().filter_map(T::from_value)
    }

    pub fn into_vec(self) -> Vec<AttributeValue> {
        self.0
    }
}

impl FromIterator<AttributeValue> for Bag {
    fn from_iter<I: IntoIterator<Item = AttributeValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Bag {
    type Item = AttributeValue;
    type IntoIter = std::vec::IntoIter<AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bag {
    type Item = &'a AttributeValue;
    type IntoIter = core::slice::Iter<'a, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
