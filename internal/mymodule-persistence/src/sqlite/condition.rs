use sqlite::Value;

/// Boolean expression tree of a where clause
#[derive(Debug, Clone)]
enum Expression {
    /// Always true
    Empty,

    /// Raw SQL expression
    Raw(String),

    /// Conjunction of two expressions
    And(Box<Expression>, Box<Expression>),
}

impl Expression {
    fn to_sql(&self) -> String {
        match self {
            Self::Empty => "true".to_string(),
            Self::Raw(sql) => sql.clone(),
            Self::And(left, right) => format!("{} and {}", left.to_sql(), right.to_sql()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Where condition builder.
///
/// Parameters placeholders are written `?*` and numbered in order of appearance when the
/// condition is expanded.
#[derive(Debug, Clone)]
pub struct WhereCondition {
    expression: Expression,
    parameters: Vec<Value>,
}

impl Default for WhereCondition {
    fn default() -> Self {
        Self {
            expression: Expression::Empty,
            parameters: Vec::new(),
        }
    }
}

impl WhereCondition {
    /// Condition from a raw SQL expression and its parameters.
    pub fn new(expression: &str, parameters: Vec<Value>) -> Self {
        Self {
            expression: Expression::Raw(expression.to_string()),
            parameters,
        }
    }

    /// Combine this condition with another one using a `and` operator.
    pub fn and_where(self, other: WhereCondition) -> Self {
        if other.expression.is_empty() {
            return self;
        }
        if self.expression.is_empty() {
            return other;
        }

        let mut parameters = self.parameters;
        parameters.extend(other.parameters);

        Self {
            expression: Expression::And(
                Box::new(wrap_disjunction(self.expression)),
                Box::new(wrap_disjunction(other.expression)),
            ),
            parameters,
        }
    }

    /// SQL representation of the condition with numbered placeholders, and its parameters.
    pub fn expand(self) -> (String, Vec<Value>) {
        self.expand_after(0)
    }

    /// Same as [expand][Self::expand] but the placeholders are numbered from `offset + 1`, the
    /// first `offset` ones being used elsewhere in the statement.
    pub fn expand_after(self, offset: usize) -> (String, Vec<Value>) {
        let sql = self.expression.to_sql();
        let mut numbered = String::with_capacity(sql.len());

        for (index, part) in sql.split("?*").enumerate() {
            if index > 0 {
                numbered.push_str(&format!("?{}", offset + index));
            }
            numbered.push_str(part);
        }

        (numbered, self.parameters)
    }
}

/// Raw expressions holding a `or` are parenthesized so the `and` keeps its meaning.
fn wrap_disjunction(expression: Expression) -> Expression {
    match expression {
        Expression::Raw(sql) if sql.to_lowercase().contains(" or ") => {
            Expression::Raw(format!("({sql})"))
        }
        other => other,
    }
}
