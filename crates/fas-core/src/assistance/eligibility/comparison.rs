use std::fmt;
use std::str::FromStr;

/// Operators recognised in a numeric condition, in match order.
///
/// Two-character operators precede their one-character prefixes so `>=18` is
/// never read as `>` followed by `=18`. A lone `=` is accepted as `==`.
const OPERATORS: [(&str, ComparisonOperator); 6] = [
    (">=", ComparisonOperator::GreaterOrEqual),
    ("<=", ComparisonOperator::LessOrEqual),
    (">", ComparisonOperator::Greater),
    ("<", ComparisonOperator::Less),
    ("==", ComparisonOperator::Equal),
    ("=", ComparisonOperator::Equal),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    Equal,
}

impl ComparisonOperator {
    pub const fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::Less => "<",
            ComparisonOperator::Equal => "==",
        }
    }
}

/// A parsed `<operator><integer>` condition such as `>=60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericCondition {
    pub operator: ComparisonOperator,
    pub operand: i64,
}

impl NumericCondition {
    pub fn is_satisfied_by(&self, value: i64) -> bool {
        match self.operator {
            ComparisonOperator::GreaterOrEqual => value >= self.operand,
            ComparisonOperator::LessOrEqual => value <= self.operand,
            ComparisonOperator::Greater => value > self.operand,
            ComparisonOperator::Less => value < self.operand,
            ComparisonOperator::Equal => value == self.operand,
        }
    }
}

impl FromStr for NumericCondition {
    type Err = ComparisonError;

    fn from_str(condition: &str) -> Result<Self, Self::Err> {
        let (operator, remainder) = OPERATORS
            .iter()
            .find_map(|(symbol, operator)| {
                condition
                    .strip_prefix(symbol)
                    .map(|remainder| (*operator, remainder))
            })
            .ok_or_else(|| ComparisonError::MissingOperator(condition.to_string()))?;

        let operand = remainder
            .trim()
            .parse::<i64>()
            .map_err(|_| ComparisonError::InvalidOperand(remainder.to_string()))?;

        Ok(Self { operator, operand })
    }
}

impl fmt::Display for NumericCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.symbol(), self.operand)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("invalid condition format: {0}")]
    MissingOperator(String),
    #[error("invalid number in condition: {0}")]
    InvalidOperand(String),
}

/// Test `num` against a condition string like `">=65"`.
pub fn compare_number(condition: &str, num: i64) -> Result<bool, ComparisonError> {
    let condition: NumericCondition = condition.parse()?;
    Ok(condition.is_satisfied_by(num))
}
