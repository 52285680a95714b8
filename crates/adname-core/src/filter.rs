use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Leaf filter kinds. Each has a fixed relational sign; negation and absence
/// additionally wrap their rendering in `(!(...))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Equality,
    Negation,
    Presence,
    Absence,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl FilterKind {
    fn sign(self) -> &'static str {
        match self {
            Self::Equality | Self::Negation | Self::Presence | Self::Absence => "=",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
        }
    }

    fn negated(self) -> bool {
        matches!(self, Self::Negation | Self::Absence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolKind {
    And,
    Or,
}

impl BoolKind {
    fn sign(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        attribute: String,
        value: String,
        kind: FilterKind,
    },
    Composite {
        kind: BoolKind,
        children: Vec<SearchFilter>,
    },
}

/// An LDAP search filter expression.
///
/// Filters are built, never parsed: leaves come from the constructor
/// functions and composition goes through [`and`](Self::and) /
/// [`or`](Self::or). Combining with a filter of the same boolean kind
/// flattens into one child list instead of nesting, so
/// `a.and(b).and(c)` renders as `(&abc)`, not `(&(&ab)c)`.
///
/// The rendered string is computed once on first use; equality and hashing
/// compare it case-insensitively.
#[derive(Debug)]
pub struct SearchFilter {
    node: Node,
    rendered: OnceLock<String>,
}

impl SearchFilter {
    fn leaf(attribute: impl Into<String>, value: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            node: Node::Leaf {
                attribute: attribute.into(),
                value: value.into(),
                kind,
            },
            rendered: OnceLock::new(),
        }
    }

    /// `(attr=value)`
    pub fn equality(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf(attribute, value, FilterKind::Equality)
    }

    /// `(!(attr=value))`
    pub fn negation(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf(attribute, value, FilterKind::Negation)
    }

    /// `(attr=*)`
    pub fn presence(attribute: impl Into<String>) -> Self {
        Self::leaf(attribute, "*", FilterKind::Presence)
    }

    /// `(!(attr=*))`
    pub fn absence(attribute: impl Into<String>) -> Self {
        Self::leaf(attribute, "*", FilterKind::Absence)
    }

    /// `(attr>=value)`
    pub fn greater_than_or_equal(
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::leaf(attribute, value, FilterKind::GreaterThanOrEqual)
    }

    /// `(attr<=value)`
    pub fn less_than_or_equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf(attribute, value, FilterKind::LessThanOrEqual)
    }

    /// Conjunction. An existing `and` node absorbs the new child.
    pub fn and(self, filter: SearchFilter) -> Self {
        self.combine(BoolKind::And, filter)
    }

    /// Disjunction. An existing `or` node absorbs the new child.
    pub fn or(self, filter: SearchFilter) -> Self {
        self.combine(BoolKind::Or, filter)
    }

    fn combine(self, kind: BoolKind, filter: SearchFilter) -> Self {
        let children = match self.node {
            Node::Composite {
                kind: own_kind,
                mut children,
            } if own_kind == kind => {
                children.push(filter);
                children
            }
            node => vec![
                Self {
                    node,
                    rendered: OnceLock::new(),
                },
                filter,
            ],
        };

        Self {
            node: Node::Composite { kind, children },
            rendered: OnceLock::new(),
        }
    }

    /// The rendered filter string.
    pub fn as_str(&self) -> &str {
        self.rendered.get_or_init(|| self.render())
    }

    fn render(&self) -> String {
        match &self.node {
            Node::Leaf {
                attribute,
                value,
                kind,
            } => {
                let body = format!("({attribute}{}{value})", kind.sign());
                if kind.negated() {
                    format!("(!{body})")
                } else {
                    body
                }
            }
            Node::Composite { kind, children } => {
                let mut rendered = String::from("(");
                rendered.push_str(kind.sign());
                for child in children {
                    rendered.push_str(child.as_str());
                }
                rendered.push(')');
                rendered
            }
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Clone for SearchFilter {
    fn clone(&self) -> Self {
        let rendered = OnceLock::new();
        if let Some(value) = self.rendered.get() {
            let _ = rendered.set(value.clone());
        }
        Self {
            node: self.node.clone(),
            rendered,
        }
    }
}

impl PartialEq for SearchFilter {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for SearchFilter {}

impl Hash for SearchFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().to_ascii_lowercase().hash(state);
    }
}
