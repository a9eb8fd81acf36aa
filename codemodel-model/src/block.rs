//! Statement blocks.
//!
//! A [`Block`] is an ordered list of local declarations and statements with
//! an insertion cursor. Every factory on [`BlockMut`] inserts at the cursor
//! and advances it, so code can be spliced into the middle of a block.
//!
//! Compound statements (`if`, `switch`, `try`, `for`) live in their own
//! arenas and are edited through the views returned by the factories.

use crate::expr::{Expr, Invocation};
use crate::registry::CodeModel;
use crate::var::Var;
use codemodel_core::names::is_java_identifier;
use codemodel_core::{
    BlockId, CatchId, Error, ForId, IfId, ModKind, Mods, Result, SwitchId, TryId, TypeId, VarId,
};

/// Name given to a catch parameter that was never named.
pub const DEFAULT_CATCH_PARAM: &str = "_x";

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression followed by `;`.
    Expr(Expr),
    /// `if`/`else`.
    If(IfId),
    /// `switch`.
    Switch(SwitchId),
    /// `try`/`catch`/`finally`.
    Try(TryId),
    /// Classic `for`.
    For(ForId),
    /// `for (T x : collection)`.
    ForEach {
        /// Loop variable.
        var: VarId,
        /// Iterated expression.
        collection: Expr,
        /// Loop body.
        body: BlockId,
    },
    /// `while`.
    While {
        /// Loop condition.
        test: Expr,
        /// Loop body.
        body: BlockId,
    },
    /// `do .. while`.
    Do {
        /// Loop condition.
        test: Expr,
        /// Loop body.
        body: BlockId,
    },
    /// `return`, with an optional value.
    Return(Option<Expr>),
    /// `throw`.
    Throw(Expr),
    /// `break`, with an optional label.
    Break(Option<String>),
    /// `continue`, with an optional label.
    Continue(Option<String>),
    /// `label:`.
    Label(String),
    /// Verbatim source.
    Direct(String),
    /// A nested block.
    Block(BlockId),
}

/// One entry of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Local variable declaration.
    Decl(VarId),
    /// Statement.
    Stmt(Statement),
}

/// Ordered block content with an insertion cursor.
#[derive(Debug, Clone)]
pub struct Block {
    pub(crate) content: Vec<Content>,
    pub(crate) pos: usize,
    pub(crate) braces_required: bool,
    pub(crate) indent_required: bool,
}

impl Block {
    fn new(braces_required: bool, indent_required: bool) -> Self {
        Self {
            content: Vec::new(),
            pos: 0,
            braces_required,
            indent_required,
        }
    }

    /// Entries in order.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Insertion cursor.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the block is wrapped in `{}`.
    #[must_use]
    pub fn braces_required(&self) -> bool {
        self.braces_required
    }

    /// Whether the block body is indented.
    #[must_use]
    pub fn indent_required(&self) -> bool {
        self.indent_required
    }

    /// True if the block has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// `if` statement.
#[derive(Debug, Clone)]
pub struct Conditional {
    pub(crate) test: Expr,
    pub(crate) then: BlockId,
    pub(crate) else_block: Option<BlockId>,
}

impl Conditional {
    /// Condition.
    #[must_use]
    pub fn test(&self) -> &Expr {
        &self.test
    }

    /// Then branch.
    #[must_use]
    pub fn then(&self) -> BlockId {
        self.then
    }

    /// Else branch, if one was requested.
    #[must_use]
    pub fn else_block(&self) -> Option<BlockId> {
        self.else_block
    }
}

/// One `case` of a switch; `None` label means `default`.
#[derive(Debug, Clone)]
pub struct Case {
    pub(crate) label: Option<Expr>,
    pub(crate) body: BlockId,
}

impl Case {
    /// Case label; `None` for `default`.
    #[must_use]
    pub fn label(&self) -> Option<&Expr> {
        self.label.as_ref()
    }

    /// Statements of the case.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.body
    }
}

/// `switch` statement.
#[derive(Debug, Clone)]
pub struct Switch {
    pub(crate) test: Expr,
    pub(crate) cases: Vec<Case>,
    pub(crate) default: Option<Case>,
}

impl Switch {
    /// Switched expression.
    #[must_use]
    pub fn test(&self) -> &Expr {
        &self.test
    }

    /// Cases in order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Default case, rendered after the others.
    #[must_use]
    pub fn default_case(&self) -> Option<&Case> {
        self.default.as_ref()
    }
}

/// One `catch` clause.
#[derive(Debug, Clone)]
pub struct CatchBlock {
    pub(crate) exception: TypeId,
    pub(crate) var: Option<VarId>,
    pub(crate) body: BlockId,
}

impl CatchBlock {
    /// Caught exception type.
    #[must_use]
    pub fn exception(&self) -> TypeId {
        self.exception
    }

    /// Named parameter; renders as `_x` when unnamed.
    #[must_use]
    pub fn var(&self) -> Option<VarId> {
        self.var
    }

    /// Handler body.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.body
    }
}

/// `try` statement.
#[derive(Debug, Clone)]
pub struct TryBlock {
    pub(crate) body: BlockId,
    pub(crate) catches: Vec<CatchBlock>,
    pub(crate) finally: Option<BlockId>,
}

impl TryBlock {
    /// Guarded body.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.body
    }

    /// Catch clauses in order.
    #[must_use]
    pub fn catches(&self) -> &[CatchBlock] {
        &self.catches
    }

    /// Finally block, if one was requested.
    #[must_use]
    pub fn finally(&self) -> Option<BlockId> {
        self.finally
    }
}

/// Initializer of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// A declared loop variable.
    Var(VarId),
    /// An expression.
    Expr(Expr),
}

/// Classic `for` loop.
#[derive(Debug, Clone)]
pub struct ForLoop {
    pub(crate) inits: Vec<ForInit>,
    pub(crate) test: Option<Expr>,
    pub(crate) updates: Vec<Expr>,
    pub(crate) body: BlockId,
}

impl ForLoop {
    /// Initializers in order.
    #[must_use]
    pub fn inits(&self) -> &[ForInit] {
        &self.inits
    }

    /// Loop condition.
    #[must_use]
    pub fn test(&self) -> Option<&Expr> {
        self.test.as_ref()
    }

    /// Update expressions in order.
    #[must_use]
    pub fn updates(&self) -> &[Expr] {
        &self.updates
    }

    /// Loop body.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.body
    }
}

fn local_var(mods: Mods, ty: TypeId, name: &str, init: Option<Expr>) -> Result<Var> {
    if !is_java_identifier(name) {
        return Err(Error::invalid_identifier(name));
    }
    let mods = mods.check(ModKind::Var)?;
    Ok(Var::new(mods, ty, name, init))
}

/// Mutable view of a block.
pub struct BlockMut<'a> {
    model: &'a mut CodeModel,
    id: BlockId,
}

impl<'a> BlockMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: BlockId) -> Self {
        Self { model, id }
    }

    fn data(&mut self) -> &mut Block {
        &mut self.model.blocks[self.id.index()]
    }

    fn insert(&mut self, content: Content) {
        let block = self.data();
        block.content.insert(block.pos, content);
        block.pos += 1;
    }

    fn stmt(&mut self, statement: Statement) -> &mut Self {
        self.insert(Content::Stmt(statement));
        self
    }

    /// Handle of the block.
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Insertion cursor.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.model.blocks[self.id.index()].pos
    }

    /// Moves the insertion cursor, returning the previous position.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPosition`] if `pos` exceeds the block length.
    pub fn set_pos(&mut self, pos: usize) -> Result<usize> {
        let block = self.data();
        let len = block.content.len();
        if pos > len {
            return Err(Error::InvalidPosition { position: pos, len });
        }
        Ok(std::mem::replace(&mut block.pos, pos))
    }

    /// Declares a local variable.
    ///
    /// A declaration forces the block to be braced and indented.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn decl(&mut self, mods: Mods, ty: TypeId, name: &str) -> Result<VarId> {
        self.declare(mods, ty, name, None)
    }

    /// Declares an initialized local variable.
    ///
    /// # Errors
    /// As [`BlockMut::decl`].
    pub fn decl_init(
        &mut self,
        mods: Mods,
        ty: TypeId,
        name: &str,
        init: impl Into<Expr>,
    ) -> Result<VarId> {
        self.declare(mods, ty, name, Some(init.into()))
    }

    fn declare(&mut self, mods: Mods, ty: TypeId, name: &str, init: Option<Expr>) -> Result<VarId> {
        let var = self.model.push_var(local_var(mods, ty, name, init)?);
        self.insert(Content::Decl(var));
        let block = self.data();
        block.braces_required = true;
        block.indent_required = true;
        Ok(var)
    }

    /// `lhs = rhs;`
    pub fn assign(&mut self, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> &mut Self {
        self.stmt(Statement::Expr(lhs.into().assign(rhs)))
    }

    /// `lhs += rhs;`
    pub fn assign_plus(&mut self, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> &mut Self {
        self.stmt(Statement::Expr(lhs.into().assign_plus(rhs)))
    }

    /// Invocation statement.
    pub fn invoke(&mut self, invocation: Invocation) -> &mut Self {
        self.stmt(Statement::Expr(invocation.into()))
    }

    /// Any expression as a statement.
    pub fn add(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.stmt(Statement::Expr(expr.into()))
    }

    /// `if (test)`.
    pub fn if_(&mut self, test: impl Into<Expr>) -> ConditionalMut<'_> {
        let id = self.model.new_conditional(test.into());
        self.stmt(Statement::If(id));
        ConditionalMut {
            model: &mut *self.model,
            id,
        }
    }

    /// Classic `for` loop.
    pub fn for_(&mut self) -> ForMut<'_> {
        let body = self.model.new_block(true, true);
        let id = ForId::next(self.model.for_loops.len());
        self.model.for_loops.push(ForLoop {
            inits: Vec::new(),
            test: None,
            updates: Vec::new(),
            body,
        });
        self.stmt(Statement::For(id));
        ForMut {
            model: &mut *self.model,
            id,
        }
    }

    /// `for (ty name : collection)`; returns the loop variable and body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal variable name.
    pub fn for_each(
        &mut self,
        ty: TypeId,
        name: &str,
        collection: impl Into<Expr>,
    ) -> Result<(VarId, BlockId)> {
        let var = self
            .model
            .push_var(local_var(Mods::NONE, ty, name, None)?);
        let body = self.model.new_block(true, true);
        self.stmt(Statement::ForEach {
            var,
            collection: collection.into(),
            body,
        });
        Ok((var, body))
    }

    /// `while (test)`; returns the body.
    pub fn while_(&mut self, test: impl Into<Expr>) -> BlockId {
        let body = self.model.new_block(true, true);
        self.stmt(Statement::While {
            test: test.into(),
            body,
        });
        body
    }

    /// `do { } while (test);`; returns the body.
    pub fn do_(&mut self, test: impl Into<Expr>) -> BlockId {
        let body = self.model.new_block(true, true);
        self.stmt(Statement::Do {
            test: test.into(),
            body,
        });
        body
    }

    /// `switch (test)`.
    pub fn switch_(&mut self, test: impl Into<Expr>) -> SwitchMut<'_> {
        let id = SwitchId::next(self.model.switches.len());
        self.model.switches.push(Switch {
            test: test.into(),
            cases: Vec::new(),
            default: None,
        });
        self.stmt(Statement::Switch(id));
        SwitchMut {
            model: &mut *self.model,
            id,
        }
    }

    /// `try`.
    pub fn try_(&mut self) -> TryMut<'_> {
        let body = self.model.new_block(true, true);
        let id = TryId::next(self.model.tries.len());
        self.model.tries.push(TryBlock {
            body,
            catches: Vec::new(),
            finally: None,
        });
        self.stmt(Statement::Try(id));
        TryMut {
            model: &mut *self.model,
            id,
        }
    }

    /// `return;`
    pub fn return_(&mut self) -> &mut Self {
        self.stmt(Statement::Return(None))
    }

    /// `return value;`
    pub fn return_value(&mut self, value: impl Into<Expr>) -> &mut Self {
        self.stmt(Statement::Return(Some(value.into())))
    }

    /// `throw exception;`
    pub fn throw_(&mut self, exception: impl Into<Expr>) -> &mut Self {
        self.stmt(Statement::Throw(exception.into()))
    }

    /// `break;`
    pub fn break_(&mut self) -> &mut Self {
        self.stmt(Statement::Break(None))
    }

    /// `break label;`
    pub fn break_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.stmt(Statement::Break(Some(label.into())))
    }

    /// `continue;`
    pub fn continue_(&mut self) -> &mut Self {
        self.stmt(Statement::Continue(None))
    }

    /// `continue label;`
    pub fn continue_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.stmt(Statement::Continue(Some(label.into())))
    }

    /// `label:`
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal label.
    pub fn label(&mut self, name: &str) -> Result<&mut Self> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        Ok(self.stmt(Statement::Label(name.to_string())))
    }

    /// Nested block without braces or indentation.
    pub fn block(&mut self) -> BlockId {
        let nested = self.model.new_block(false, false);
        self.stmt(Statement::Block(nested));
        nested
    }

    /// Verbatim statement source, printed on its own line.
    pub fn direct_statement(&mut self, source: impl Into<String>) -> &mut Self {
        self.stmt(Statement::Direct(source.into()))
    }

    /// True if the block has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.blocks[self.id.index()].is_empty()
    }
}

/// Mutable view of an `if` statement.
pub struct ConditionalMut<'a> {
    model: &'a mut CodeModel,
    id: IfId,
}

impl ConditionalMut<'_> {
    /// Handle of the statement.
    #[must_use]
    pub fn id(&self) -> IfId {
        self.id
    }

    /// Then branch.
    #[must_use]
    pub fn then(&self) -> BlockId {
        self.model.conditionals[self.id.index()].then
    }

    /// Else branch, created on first use.
    pub fn else_(&mut self) -> BlockId {
        self.model.else_block(self.id)
    }

    /// `else if (test)`: an `if` inside the else branch.
    pub fn else_if(&mut self, test: impl Into<Expr>) -> ConditionalMut<'_> {
        let else_block = self.model.else_block(self.id);
        let id = self.model.new_conditional(test.into());
        self.model
            .block_mut(else_block)
            .stmt(Statement::If(id));
        ConditionalMut {
            model: &mut *self.model,
            id,
        }
    }
}

/// Mutable view of a `switch` statement.
pub struct SwitchMut<'a> {
    model: &'a mut CodeModel,
    id: SwitchId,
}

impl SwitchMut<'_> {
    /// Handle of the statement.
    #[must_use]
    pub fn id(&self) -> SwitchId {
        self.id
    }

    /// Appends `case label:` and returns its body.
    pub fn case(&mut self, label: impl Into<Expr>) -> BlockId {
        let body = self.model.new_block(false, true);
        self.model.switches[self.id.index()].cases.push(Case {
            label: Some(label.into()),
            body,
        });
        body
    }

    /// The `default:` case, created on first use.
    pub fn default_case(&mut self) -> BlockId {
        if let Some(case) = &self.model.switches[self.id.index()].default {
            return case.body;
        }
        let body = self.model.new_block(false, true);
        self.model.switches[self.id.index()].default = Some(Case { label: None, body });
        body
    }
}

/// Mutable view of a `try` statement.
pub struct TryMut<'a> {
    model: &'a mut CodeModel,
    id: TryId,
}

impl TryMut<'_> {
    /// Handle of the statement.
    #[must_use]
    pub fn id(&self) -> TryId {
        self.id
    }

    /// Guarded body.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.model.tries[self.id.index()].body
    }

    /// Appends a `catch` clause for `exception`.
    pub fn catch(&mut self, exception: TypeId) -> CatchId {
        let body = self.model.new_block(true, true);
        let catches = &mut self.model.tries[self.id.index()].catches;
        catches.push(CatchBlock {
            exception,
            var: None,
            body,
        });
        CatchId::new(self.id, catches.len() - 1)
    }

    /// The `finally` block, created on first use.
    pub fn finally(&mut self) -> BlockId {
        if let Some(finally) = self.model.tries[self.id.index()].finally {
            return finally;
        }
        let finally = self.model.new_block(true, true);
        self.model.tries[self.id.index()].finally = Some(finally);
        finally
    }
}

/// Mutable view of a classic `for` loop.
pub struct ForMut<'a> {
    model: &'a mut CodeModel,
    id: ForId,
}

impl ForMut<'_> {
    fn for_loop(&mut self) -> &mut ForLoop {
        &mut self.model.for_loops[self.id.index()]
    }

    /// Handle of the loop.
    #[must_use]
    pub fn id(&self) -> ForId {
        self.id
    }

    /// Declares a loop variable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn init(
        &mut self,
        mods: Mods,
        ty: TypeId,
        name: &str,
        init: impl Into<Expr>,
    ) -> Result<VarId> {
        let var = self
            .model
            .push_var(local_var(mods, ty, name, Some(init.into()))?);
        self.for_loop().inits.push(ForInit::Var(var));
        Ok(var)
    }

    /// Adds an initializer expression.
    pub fn init_expr(&mut self, expr: impl Into<Expr>) -> &mut Self {
        self.for_loop().inits.push(ForInit::Expr(expr.into()));
        self
    }

    /// Sets the loop condition.
    pub fn test(&mut self, test: impl Into<Expr>) -> &mut Self {
        self.for_loop().test = Some(test.into());
        self
    }

    /// Adds an update expression.
    pub fn update(&mut self, update: impl Into<Expr>) -> &mut Self {
        self.for_loop().updates.push(update.into());
        self
    }

    /// Loop body.
    #[must_use]
    pub fn body(&self) -> BlockId {
        self.model.for_loops[self.id.index()].body
    }
}

impl CodeModel {
    pub(crate) fn new_block(&mut self, braces_required: bool, indent_required: bool) -> BlockId {
        let id = BlockId::next(self.blocks.len());
        self.blocks
            .push(Block::new(braces_required, indent_required));
        id
    }

    fn new_conditional(&mut self, test: Expr) -> IfId {
        let then = self.new_block(true, true);
        let id = IfId::next(self.conditionals.len());
        self.conditionals.push(Conditional {
            test,
            then,
            else_block: None,
        });
        id
    }

    fn else_block(&mut self, id: IfId) -> BlockId {
        if let Some(block) = self.conditionals[id.index()].else_block {
            return block;
        }
        let block = self.new_block(true, true);
        self.conditionals[id.index()].else_block = Some(block);
        block
    }

    /// Creates a free-standing braced block.
    pub fn detached_block(&mut self) -> BlockId {
        self.new_block(true, true)
    }

    /// Returns a block.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Mutable view of a block.
    pub fn block_mut(&mut self, id: BlockId) -> BlockMut<'_> {
        BlockMut::new(self, id)
    }

    /// Returns an `if` statement.
    #[must_use]
    pub fn conditional(&self, id: IfId) -> &Conditional {
        &self.conditionals[id.index()]
    }

    /// Mutable view of an `if` statement.
    pub fn conditional_mut(&mut self, id: IfId) -> ConditionalMut<'_> {
        ConditionalMut { model: self, id }
    }

    /// Returns a `switch` statement.
    #[must_use]
    pub fn switch(&self, id: SwitchId) -> &Switch {
        &self.switches[id.index()]
    }

    /// Mutable view of a `switch` statement.
    pub fn switch_mut(&mut self, id: SwitchId) -> SwitchMut<'_> {
        SwitchMut { model: self, id }
    }

    /// Returns a `try` statement.
    #[must_use]
    pub fn try_block(&self, id: TryId) -> &TryBlock {
        &self.tries[id.index()]
    }

    /// Mutable view of a `try` statement.
    pub fn try_mut(&mut self, id: TryId) -> TryMut<'_> {
        TryMut { model: self, id }
    }

    /// Returns a catch clause.
    #[must_use]
    pub fn catch_block(&self, id: CatchId) -> &CatchBlock {
        &self.tries[id.try_id().index()].catches[id.index()]
    }

    /// Body of a catch clause.
    #[must_use]
    pub fn catch_body(&self, id: CatchId) -> BlockId {
        self.catch_block(id).body
    }

    /// Names the parameter of a catch clause.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the parameter was already
    /// named and [`Error::InvalidIdentifier`] for an illegal name.
    pub fn catch_param(&mut self, id: CatchId, name: &str) -> Result<VarId> {
        let catch = &self.tries[id.try_id().index()].catches[id.index()];
        if catch.var.is_some() {
            return Err(Error::invalid_operation(
                "the catch parameter is already named",
            ));
        }
        let exception = catch.exception;
        let var = self.push_var(local_var(Mods::NONE, exception, name, None)?);
        self.tries[id.try_id().index()].catches[id.index()].var = Some(var);
        Ok(var)
    }

    /// Returns a classic `for` loop.
    #[must_use]
    pub fn for_loop(&self, id: ForId) -> &ForLoop {
        &self.for_loops[id.index()]
    }

    /// Mutable view of a classic `for` loop.
    pub fn for_mut(&mut self, id: ForId) -> ForMut<'_> {
        ForMut { model: self, id }
    }
}
