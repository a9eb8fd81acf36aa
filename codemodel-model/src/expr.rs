//! Expressions.
//!
//! An [`Expr`] is an owned, immutable tree built bottom-up. Composers on
//! `Expr` and the free functions in [`op`] wrap their operands; the boolean
//! short-circuit composers fold against [`TRUE`] and [`FALSE`].

use codemodel_core::literal::{double_token, float_token, int_token, long_token, quotify};
use codemodel_core::{TypeId, VarId};

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `char`
    Char(char),
    /// String literal.
    Str(String),
}

impl Literal {
    /// Source token of the literal.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => int_token(*n),
            Self::Long(n) => long_token(*n),
            Self::Float(f) => float_token(*f),
            Self::Double(d) => double_token(*d),
            Self::Char(c) => {
                let mut buf = [0u8; 4];
                quotify('\'', c.encode_utf8(&mut buf))
            }
            Self::Str(s) => quotify('"', s),
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

literal_from!(
    bool => Bool,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Str,
);

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Prefix operators.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `~`
    Complement,
}

impl UnaryOp {
    /// Operator token.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::Complement => "~",
        }
    }
}

/// Increment and decrement, rendered after the operand.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PostfixOp {
    /// `++`
    Incr,
    /// `--`
    Decr,
}

impl PostfixOp {
    /// Operator token.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Incr => "++",
            Self::Decr => "--",
        }
    }
}

/// Infix operators.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    Shrz,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    Xor,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl BinaryOp {
    /// Operator token.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Shrz => ">>>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Xor => "^",
            Self::And => "&&",
            Self::Or => "||",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// Receiver of a method invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// `expr.name(..)`
    Expr(Box<Expr>),
    /// `Type.name(..)`
    Type(TypeId),
}

/// What an [`Invocation`] calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// `new T(..)`, or `new T[]{..}` when `T` is an array type.
    New(TypeId),
    /// A method, optionally qualified.
    Method {
        /// Receiver; `None` for an unqualified call.
        target: Option<Target>,
        /// Method name.
        name: String,
    },
}

/// A method or constructor invocation under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Invoked method or constructor.
    pub callee: Callee,
    /// Arguments in order.
    pub args: Vec<Expr>,
}

impl Invocation {
    /// Unqualified call `name(..)`.
    #[must_use]
    pub fn call(name: impl Into<String>) -> Self {
        Self::with_callee(Callee::Method {
            target: None,
            name: name.into(),
        })
    }

    /// Instance call `target.name(..)`.
    #[must_use]
    pub fn method(target: Expr, name: impl Into<String>) -> Self {
        Self::with_callee(Callee::Method {
            target: Some(Target::Expr(Box::new(target))),
            name: name.into(),
        })
    }

    /// Static call `Type.name(..)`.
    #[must_use]
    pub fn static_call(ty: TypeId, name: impl Into<String>) -> Self {
        Self::with_callee(Callee::Method {
            target: Some(Target::Type(ty)),
            name: name.into(),
        })
    }

    /// Constructor call `new Type(..)`.
    ///
    /// With an anonymous class handle the class body is rendered inline.
    #[must_use]
    pub fn new_instance(ty: TypeId) -> Self {
        Self::with_callee(Callee::New(ty))
    }

    fn with_callee(callee: Callee) -> Self {
        Self {
            callee,
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Expr>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl From<Invocation> for Expr {
    fn from(invocation: Invocation) -> Self {
        Expr::Invoke(Box::new(invocation))
    }
}

/// Array creation `new T[size]` or `new T[] {..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    /// Element type; may itself be an array.
    pub ty: TypeId,
    /// Explicit size.
    pub size: Option<Box<Expr>>,
    /// Initializers; `None` until the first one is added.
    pub exprs: Option<Vec<Expr>>,
}

impl NewArray {
    /// Array of `ty` with no size.
    #[must_use]
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            size: None,
            exprs: None,
        }
    }

    /// Array of `ty` with an explicit size.
    #[must_use]
    pub fn sized(ty: TypeId, size: impl Into<Expr>) -> Self {
        Self {
            size: Some(Box::new(size.into())),
            ..Self::new(ty)
        }
    }

    /// Appends an initializer.
    #[must_use]
    pub fn add(mut self, expr: impl Into<Expr>) -> Self {
        self.exprs.get_or_insert_with(Vec::new).push(expr.into());
        self
    }
}

impl From<NewArray> for Expr {
    fn from(array: NewArray) -> Self {
        Expr::NewArray(Box::new(array))
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant.
    Lit(Literal),
    /// `null`
    Null,
    /// `this`
    This,
    /// `super`
    Super,
    /// A field, local or parameter declared in the model.
    Var(VarId),
    /// `target.name`, or a bare `name`.
    Field {
        /// Qualifier.
        target: Option<Box<Expr>>,
        /// Field name.
        name: String,
    },
    /// `Type.name`; also used for enum constants.
    StaticField {
        /// Declaring type.
        ty: TypeId,
        /// Field name.
        name: String,
    },
    /// `array[index]`
    Component {
        /// Array expression.
        array: Box<Expr>,
        /// Index expression.
        index: Box<Expr>,
    },
    /// A method or constructor invocation.
    Invoke(Box<Invocation>),
    /// Array creation.
    NewArray(Box<NewArray>),
    /// `(op expr)`
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        expr: Box<Expr>,
    },
    /// `expr op`
    Postfix {
        /// Operator.
        op: PostfixOp,
        /// Operand.
        expr: Box<Expr>,
    },
    /// `(lhs op rhs)`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// `(test ? then : otherwise)`
    Ternary {
        /// Condition.
        test: Box<Expr>,
        /// Value when true.
        then: Box<Expr>,
        /// Value when false.
        otherwise: Box<Expr>,
    },
    /// `(expr instanceof ty)`
    InstanceOf {
        /// Tested value.
        expr: Box<Expr>,
        /// Tested type.
        ty: TypeId,
    },
    /// `((ty) expr)`
    Cast {
        /// Target type.
        ty: TypeId,
        /// Converted value.
        expr: Box<Expr>,
    },
    /// `lhs = rhs`, or a compound `lhs op= rhs`.
    Assign {
        /// Assignment target.
        lhs: Box<Expr>,
        /// Compound operator.
        op: Option<BinaryOp>,
        /// Assigned value.
        rhs: Box<Expr>,
    },
    /// `Type.class`
    DotClass(TypeId),
    /// Verbatim source, parenthesized.
    Direct(String),
}

/// The `true` literal.
pub const TRUE: Expr = Expr::Lit(Literal::Bool(true));
/// The `false` literal.
pub const FALSE: Expr = Expr::Lit(Literal::Bool(false));

impl Expr {
    /// Literal expression.
    #[must_use]
    pub fn lit(value: impl Into<Literal>) -> Self {
        Self::Lit(value.into())
    }

    /// Unqualified field reference.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field {
            target: None,
            name: name.into(),
        }
    }

    /// `this.name`
    #[must_use]
    pub fn this_field(name: impl Into<String>) -> Self {
        Self::This.dot(name)
    }

    /// Static field or enum constant `Type.name`.
    #[must_use]
    pub fn static_field(ty: TypeId, name: impl Into<String>) -> Self {
        Self::StaticField {
            ty,
            name: name.into(),
        }
    }

    /// `Type.class`
    #[must_use]
    pub fn dot_class(ty: TypeId) -> Self {
        Self::DotClass(ty)
    }

    /// Verbatim source.
    #[must_use]
    pub fn direct(source: impl Into<String>) -> Self {
        Self::Direct(source.into())
    }

    /// `self.name`
    #[must_use]
    pub fn dot(self, name: impl Into<String>) -> Self {
        Self::Field {
            target: Some(Box::new(self)),
            name: name.into(),
        }
    }

    /// `self[index]`
    #[must_use]
    pub fn component(self, index: impl Into<Expr>) -> Self {
        Self::Component {
            array: Box::new(self),
            index: Box::new(index.into()),
        }
    }

    /// Starts an invocation on `self`.
    #[must_use]
    pub fn invoke(self, name: impl Into<String>) -> Invocation {
        Invocation::method(self, name)
    }

    /// `((ty) self)`
    #[must_use]
    pub fn cast(self, ty: TypeId) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(self),
        }
    }

    /// `self = rhs`
    #[must_use]
    pub fn assign(self, rhs: impl Into<Expr>) -> Self {
        Self::Assign {
            lhs: Box::new(self),
            op: None,
            rhs: Box::new(rhs.into()),
        }
    }

    /// `self += rhs`
    #[must_use]
    pub fn assign_plus(self, rhs: impl Into<Expr>) -> Self {
        Self::Assign {
            lhs: Box::new(self),
            op: Some(BinaryOp::Plus),
            rhs: Box::new(rhs.into()),
        }
    }

    /// Whether the expression renders with a top-level operator, which
    /// already supplies the parentheses a condition needs.
    #[must_use]
    pub fn has_top_op(&self) -> bool {
        matches!(
            self,
            Self::Unary { .. } | Self::Postfix { .. } | Self::Binary { .. } | Self::InstanceOf { .. }
        )
    }

    /// Is this the `true` literal?
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Lit(Literal::Bool(true)))
    }

    /// Is this the `false` literal?
    #[must_use]
    pub fn is_false(&self) -> bool {
        matches!(self, Self::Lit(Literal::Bool(false)))
    }

    /// `(self + rhs)`
    #[must_use]
    pub fn plus(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Plus, self, rhs.into())
    }

    /// `(self - rhs)`
    #[must_use]
    pub fn minus(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Minus, self, rhs.into())
    }

    /// `(self * rhs)`
    #[must_use]
    pub fn mul(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Mul, self, rhs.into())
    }

    /// `(self / rhs)`
    #[must_use]
    pub fn div(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Div, self, rhs.into())
    }

    /// `(self % rhs)`
    #[must_use]
    pub fn rem(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Rem, self, rhs.into())
    }

    /// `(self << rhs)`
    #[must_use]
    pub fn shl(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Shl, self, rhs.into())
    }

    /// `(self >> rhs)`
    #[must_use]
    pub fn shr(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Shr, self, rhs.into())
    }

    /// `(self >>> rhs)`
    #[must_use]
    pub fn shrz(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Shrz, self, rhs.into())
    }

    /// `(self & rhs)`
    #[must_use]
    pub fn band(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::BitAnd, self, rhs.into())
    }

    /// `(self | rhs)`
    #[must_use]
    pub fn bor(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::BitOr, self, rhs.into())
    }

    /// `(self ^ rhs)`
    #[must_use]
    pub fn xor(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Xor, self, rhs.into())
    }

    /// `(self && rhs)`, folded against the boolean literals.
    #[must_use]
    pub fn cand(self, rhs: impl Into<Expr>) -> Self {
        op::cand(self, rhs.into())
    }

    /// `(self || rhs)`, folded against the boolean literals.
    #[must_use]
    pub fn cor(self, rhs: impl Into<Expr>) -> Self {
        op::cor(self, rhs.into())
    }

    /// `(self < rhs)`
    #[must_use]
    pub fn lt(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Lt, self, rhs.into())
    }

    /// `(self <= rhs)`
    #[must_use]
    pub fn lte(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Lte, self, rhs.into())
    }

    /// `(self > rhs)`
    #[must_use]
    pub fn gt(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Gt, self, rhs.into())
    }

    /// `(self >= rhs)`
    #[must_use]
    pub fn gte(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Gte, self, rhs.into())
    }

    /// `(self == rhs)`
    #[must_use]
    pub fn equal(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Eq, self, rhs.into())
    }

    /// `(self != rhs)`
    #[must_use]
    pub fn not_equal(self, rhs: impl Into<Expr>) -> Self {
        op::binary(BinaryOp::Ne, self, rhs.into())
    }

    /// `(self instanceof ty)`
    #[must_use]
    pub fn instance_of(self, ty: TypeId) -> Self {
        Self::InstanceOf {
            expr: Box::new(self),
            ty,
        }
    }

    /// `self++`
    #[must_use]
    pub fn incr(self) -> Self {
        Self::Postfix {
            op: PostfixOp::Incr,
            expr: Box::new(self),
        }
    }

    /// `self--`
    #[must_use]
    pub fn decr(self) -> Self {
        Self::Postfix {
            op: PostfixOp::Decr,
            expr: Box::new(self),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Self::Lit(value)
    }
}

impl From<VarId> for Expr {
    fn from(var: VarId) -> Self {
        Self::Var(var)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::lit(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::lit(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::lit(value)
    }
}

/// Operator composers.
pub mod op {
    use super::{BinaryOp, Expr, UnaryOp};

    /// Wraps two operands in a binary operator.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn unary(op: UnaryOp, expr: Expr) -> Expr {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// `(!expr)`; the boolean literals are inverted in place.
    #[must_use]
    pub fn not(expr: Expr) -> Expr {
        if expr.is_true() {
            super::FALSE
        } else if expr.is_false() {
            super::TRUE
        } else {
            unary(UnaryOp::Not, expr)
        }
    }

    /// `(-expr)`
    #[must_use]
    pub fn neg(expr: Expr) -> Expr {
        unary(UnaryOp::Neg, expr)
    }

    /// `(~expr)`
    #[must_use]
    pub fn complement(expr: Expr) -> Expr {
        unary(UnaryOp::Complement, expr)
    }

    /// `(lhs && rhs)` with constant folding.
    #[must_use]
    pub fn cand(lhs: Expr, rhs: Expr) -> Expr {
        if lhs.is_true() {
            rhs
        } else if rhs.is_true() || lhs.is_false() {
            lhs
        } else if rhs.is_false() {
            rhs
        } else {
            binary(BinaryOp::And, lhs, rhs)
        }
    }

    /// `(lhs || rhs)` with constant folding.
    #[must_use]
    pub fn cor(lhs: Expr, rhs: Expr) -> Expr {
        if lhs.is_true() {
            lhs
        } else if rhs.is_true() || lhs.is_false() {
            rhs
        } else if rhs.is_false() {
            lhs
        } else {
            binary(BinaryOp::Or, lhs, rhs)
        }
    }

    /// `(test ? then : otherwise)`
    #[must_use]
    pub fn cond(test: Expr, then: Expr, otherwise: Expr) -> Expr {
        Expr::Ternary {
            test: Box::new(test),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cand_folding() {
        let x = Expr::field("x");
        assert_eq!(x.clone().cand(FALSE), FALSE);
        assert_eq!(TRUE.cand(x.clone()), x);
        assert_eq!(x.clone().cand(TRUE), x);
        assert_eq!(FALSE.cand(x.clone()), FALSE);
        assert!(matches!(
            x.clone().cand(Expr::field("y")),
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        ));
    }

    #[test]
    fn test_cor_folding() {
        let x = Expr::field("x");
        assert_eq!(x.clone().cor(TRUE), TRUE);
        assert_eq!(TRUE.cor(x.clone()), TRUE);
        assert_eq!(FALSE.cor(x.clone()), x);
        assert_eq!(x.clone().cor(FALSE), x);
    }

    #[test]
    fn test_not_folding() {
        assert_eq!(op::not(TRUE), FALSE);
        assert_eq!(op::not(FALSE), TRUE);
        assert!(op::not(Expr::field("x")).has_top_op());
    }

    #[test]
    fn test_literal_tokens() {
        assert_eq!(Literal::from(-0.0f64).token(), "-0.0D");
        assert_eq!(
            Literal::from(f64::INFINITY).token(),
            "java.lang.Double.POSITIVE_INFINITY"
        );
        assert_eq!(Literal::from('\n').token(), "'\\n'");
        assert_eq!(Literal::from("a\"b").token(), "\"a\\\"b\"");
        assert_eq!(Literal::from(7i64).token(), "7L");
        assert_eq!(Literal::from(true).token(), "true");
    }

    #[test]
    fn test_invocation_builder() {
        let call: Expr = Expr::This.invoke("size").arg(1).arg("a").into();
        match call {
            Expr::Invoke(invocation) => {
                assert_eq!(invocation.args.len(), 2);
                assert!(matches!(invocation.callee, Callee::Method { .. }));
            }
            other => panic!("unexpected expression {other:?}"),
        }
    }

    #[test]
    fn test_new_array_initializers() {
        let sized = NewArray::sized(TypeId::INT, 3);
        assert!(sized.exprs.is_none());
        let init = NewArray::new(TypeId::INT).add(1).add(2);
        assert_eq!(init.exprs.map(|e| e.len()), Some(2));
    }
}
