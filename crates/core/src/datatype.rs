use core::fmt;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

macro_rules! datatypes {
    ($($variant:ident => $uri:expr, $short:literal;)*) => {
        /// The closed set of attribute datatypes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum DataType {
            $($variant,)*
        }

        impl DataType {
            pub const ALL: &'static [DataType] = &[$(DataType::$variant,)*];

            /// Identifier URI.
            pub fn uri(self) -> &'static str {
                match self {
                    $(DataType::$variant => $uri,)*
                }
            }

            /// Name used in function identifiers and diagnostics (`dayTimeDuration`, `x500Name`).
            pub fn short_name(self) -> &'static str {
                match self {
                    $(DataType::$variant => $short,)*
                }
            }
        }
    };
}

datatypes! {
    String => "http://www.w3.org/2001/XMLSchema#string", "string";
    Boolean => "http://www.w3.org/2001/XMLSchema#boolean", "boolean";
    Integer => "http://www.w3.org/2001/XMLSchema#integer", "integer";
    Double => "http://www.w3.org/2001/XMLSchema#double", "double";
    Time => "http://www.w3.org/2001/XMLSchema#time", "time";
    Date => "http://www.w3.org/2001/XMLSchema#date", "date";
    DateTime => "http://www.w3.org/2001/XMLSchema#dateTime", "dateTime";
    AnyUri => "http://www.w3.org/2001/XMLSchema#anyURI", "anyURI";
    HexBinary => "http://www.w3.org/2001/XMLSchema#hexBinary", "hexBinary";
    Base64Binary => "http://www.w3.org/2001/XMLSchema#base64Binary", "base64Binary";
    DayTimeDuration => "http://www.w3.org/2001/XMLSchema#dayTimeDuration", "dayTimeDuration";
    YearMonthDuration => "http://www.w3.org/2001/XMLSchema#yearMonthDuration", "yearMonthDuration";
    X500Name => "urn:oasis:names:tc:xacml:1.0:data-type:x500Name", "x500Name";
    Rfc822Name => "urn:oasis:names:tc:xacml:1.0:data-type:rfc822Name", "rfc822Name";
    IpAddress => "urn:oasis:names:tc:xacml:2.0:data-type:ipAddress", "ipAddress";
    DnsName => "urn:oasis:names:tc:xacml:2.0:data-type:dnsName", "dnsName";
    XPathExpression => "urn:oasis:names:tc:xacml:3.0:data-type:xpathExpression", "xpathExpression";
}

const LEGACY_DAY_TIME: &str = "http://www.w3.org/TR/2002/WD-xquery-operators-20020816#dayTimeDuration";
const LEGACY_YEAR_MONTH: &str = "http://www.w3.org/TR/2002/WD-xquery-operators-20020816#yearMonthDuration";

impl DataType {
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            LEGACY_DAY_TIME => Some(DataType::DayTimeDuration),
            LEGACY_YEAR_MONTH => Some(DataType::YearMonthDuration),
            _ => Self::ALL.iter().copied().find(|dt| dt.uri() == uri),
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|dt| dt.short_name() == name)
    }

    pub fn is_xml_schema(self) -> bool {
        self.uri().starts_with(XSD)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}
