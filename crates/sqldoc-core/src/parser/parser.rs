//! SQL Parser implementation.

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op, UNARY_BP,
};
use crate::ast::{
    AlterColumnAction, AlterTableOperation, AlterTableStatement, Assignment, ColumnConstraint,
    ColumnDef, CreateDatabaseStatement, CreateIndexStatement, CreateTableBody,
    CreateTableStatement, CreateViewStatement, Cte, DataType, DeleteStatement, DropBehavior,
    DropStatement, Expr, ForeignKeyRef, FunctionCall, GrantStatement, Grantee, InsertSource,
    InsertStatement, JoinClause, JoinConstraint, JoinType, Literal, NamedColumnConstraint,
    NullOrdering, ObjectName, ObjectType, OrderBy, OrderDirection, Privileges, Quantifier, Query,
    ReferentialAction, RevokeStatement, SelectItem, SelectStatement, SetExpr, SetOperator,
    Statement, TableConstraint, TableConstraintKind, TableRef, TransactionStatement,
    UpdateStatement, WindowSpec, With,
};
use crate::dialect::{Dialect, GenericDialect};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

static GENERIC: GenericDialect = GenericDialect;

/// A statement of a script together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStatement {
    /// The parsed statement.
    pub statement: Statement,
    /// Byte range of the statement, excluding its terminating `;`.
    pub span: Span,
    /// Whether the statement ended with `;`.
    pub terminated: bool,
}

/// SQL Parser.
pub struct Parser<'a> {
    source: &'a str,
    dialect: &'a dyn Dialect,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input using the generic dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &GENERIC)
    }

    /// Creates a new parser for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        let mut lexer = Lexer::with_dialect(input, dialect);
        let current = lexer.next_token();
        Self {
            source: input,
            dialect,
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Parses exactly one SQL statement, with an optional trailing `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement_body()?;
        self.consume(&TokenKind::Semicolon);
        if !self.current.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(statement)
    }

    /// Parses a script of statements separated by `;`.
    ///
    /// Empty statements are skipped, so an input of only comments and
    /// semicolons yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse_script(&mut self) -> Result<Vec<ScriptStatement>, ParseError> {
        let mut statements = vec![];
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            let start = self.current.span.start;
            let statement = self.parse_statement_body()?;
            let span = Span::new(start, self.previous.span.end);
            let terminated = match self.current.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    true
                }
                TokenKind::Eof => false,
                _ => return Err(self.unexpected("`;` or end of input")),
            };
            statements.push(ScriptStatement {
                statement,
                span,
                terminated,
            });
        }
        Ok(statements)
    }

    fn parse_statement_body(&mut self) -> Result<Statement, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen => {
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            TokenKind::Keyword(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Keyword::Update) => Ok(Statement::Update(self.parse_update()?)),
            TokenKind::Keyword(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Drop) => Ok(Statement::Drop(self.parse_drop()?)),
            TokenKind::Keyword(Keyword::Alter) => {
                Ok(Statement::AlterTable(self.parse_alter_table()?))
            }
            TokenKind::Keyword(Keyword::Truncate) => {
                self.advance();
                self.consume_keyword(Keyword::Table);
                Ok(Statement::Truncate(self.parse_object_name()?))
            }
            TokenKind::Keyword(Keyword::Use) => {
                self.advance();
                Ok(Statement::Use(self.expect_identifier()?))
            }
            TokenKind::Keyword(Keyword::Grant) => Ok(Statement::Grant(self.parse_grant()?)),
            TokenKind::Keyword(Keyword::Revoke) => Ok(Statement::Revoke(self.parse_revoke()?)),
            TokenKind::Keyword(
                Keyword::Begin
                | Keyword::Start
                | Keyword::Commit
                | Keyword::Rollback
                | Keyword::Savepoint
                | Keyword::Release,
            ) => Ok(Statement::Transaction(self.parse_transaction()?)),
            _ => Err(self.unexpected("statement")),
        }
    }

    // --- Queries ---

    /// Parses a query: `[WITH ...] body [ORDER BY ...] [LIMIT ...] [OFFSET ...]`.
    fn parse_query(&mut self) -> Result<Query, ParseError> {
        let with = if self.consume_keyword(Keyword::With) {
            Some(self.parse_with()?)
        } else {
            None
        };

        let body = self.parse_set_expr(0)?;

        let order_by = if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        let mut limit = None;
        let mut offset = None;
        if self.consume_keyword(Keyword::Limit) {
            let first = self.parse_expression(0)?;
            if self.check(&TokenKind::Comma) {
                if !self.dialect.supports_limit_comma() {
                    return Err(ParseError::new(
                        format!(
                            "`LIMIT offset, count` is not supported by the {} dialect",
                            self.dialect.name()
                        ),
                        self.current.span,
                    ));
                }
                self.advance();
                offset = Some(first);
                limit = Some(self.parse_expression(0)?);
            } else {
                limit = Some(first);
            }
        }
        if offset.is_none() && self.consume_keyword(Keyword::Offset) {
            offset = Some(self.parse_expression(0)?);
        }

        Ok(Query {
            with,
            body,
            order_by,
            limit,
            offset,
        })
    }

    fn parse_with(&mut self) -> Result<With, ParseError> {
        let recursive = self.consume_keyword(Keyword::Recursive);
        let mut ctes = vec![];
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(Cte {
                name,
                columns,
                query: Box::new(query),
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(With { recursive, ctes })
    }

    /// Parses select blocks joined by set operators.
    ///
    /// `INTERSECT` binds tighter than `UNION` and `EXCEPT`.
    fn parse_set_expr(&mut self, min_bp: u8) -> Result<SetExpr, ParseError> {
        let mut left = if self.consume(&TokenKind::LeftParen) {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            SetExpr::Query(Box::new(query))
        } else {
            SetExpr::Select(Box::new(self.parse_select()?))
        };

        loop {
            let (op, l_bp, r_bp) = match &self.current.kind {
                TokenKind::Keyword(Keyword::Union) => (SetOperator::Union, 1, 2),
                TokenKind::Keyword(Keyword::Except) => (SetOperator::Except, 1, 2),
                TokenKind::Keyword(Keyword::Intersect) => (SetOperator::Intersect, 3, 4),
                _ => break,
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let all = self.consume_keyword(Keyword::All);
            if !all {
                self.consume_keyword(Keyword::Distinct);
            }
            let right = self.parse_set_expr(r_bp)?;
            left = SetExpr::SetOperation {
                op,
                all,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses a single `SELECT` block.
    fn parse_select(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.consume_keyword(Keyword::Distinct) {
            true
        } else {
            self.consume_keyword(Keyword::All);
            false
        };

        let columns = self.parse_select_items()?;

        // FROM clause (optional for expressions like SELECT 1+1)
        let from = if self.consume_keyword(Keyword::From) {
            self.parse_table_refs()?
        } else {
            vec![]
        };

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let group_by = if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        let having = if self.consume_keyword(Keyword::Having) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
        })
    }

    fn parse_select_items(&mut self) -> Result<Vec<SelectItem>, ParseError> {
        let mut columns = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let alias = self.parse_optional_alias()?;
            columns.push(SelectItem { expr, alias });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(columns)
    }

    /// Parses `AS name`, `AS 'name'` or a bare identifier alias.
    ///
    /// Keywords are only accepted as aliases after `AS`.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            if let TokenKind::String(value) = &self.current.kind {
                let alias = value.clone();
                self.advance();
                return Ok(Some(alias));
            }
            return self.expect_identifier().map(Some);
        }
        if let TokenKind::Identifier { value, .. } = &self.current.kind {
            let alias = value.clone();
            self.advance();
            return Ok(Some(alias));
        }
        Ok(None)
    }

    /// Parses comma-separated FROM items.
    fn parse_table_refs(&mut self) -> Result<Vec<TableRef>, ParseError> {
        let mut refs = vec![self.parse_table_ref()?];
        while self.consume(&TokenKind::Comma) {
            refs.push(self.parse_table_ref()?);
        }
        Ok(refs)
    }

    /// Parses a table reference followed by any number of joins.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = self.parse_table_factor()?;

        while let Some((join_type, natural)) = self.parse_join_operator()? {
            let table = self.parse_table_factor()?;
            let constraint = if natural {
                JoinConstraint::Natural
            } else if join_type == JoinType::Cross {
                JoinConstraint::None
            } else if self.consume_keyword(Keyword::On) {
                JoinConstraint::On(self.parse_expression(0)?)
            } else if self.check_keyword(Keyword::Using) {
                self.advance();
                JoinConstraint::Using(self.parse_parenthesized_identifiers()?)
            } else {
                return Err(self.unexpected("ON or USING"));
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table,
                    constraint,
                }),
            };
        }

        Ok(table_ref)
    }

    /// Parses a join operator, returning the join type and whether it was
    /// `NATURAL`.
    fn parse_join_operator(&mut self) -> Result<Option<(JoinType, bool)>, ParseError> {
        let natural = self.consume_keyword(Keyword::Natural);
        let join_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Join) => JoinType::Inner,
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(kw @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                let join_type = match kw {
                    Keyword::Left => JoinType::Left,
                    Keyword::Right => JoinType::Right,
                    _ => JoinType::Full,
                };
                self.advance();
                self.consume_keyword(Keyword::Outer);
                join_type
            }
            TokenKind::Keyword(Keyword::Cross) if !natural => {
                self.advance();
                JoinType::Cross
            }
            _ if natural => return Err(self.unexpected("JOIN")),
            _ => return Ok(None),
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(Some((join_type, natural)))
    }

    /// Parses a table name, a derived table or a parenthesized join.
    fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        if self.consume(&TokenKind::LeftParen) {
            if self.starts_query() {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?;
                return Ok(TableRef::Subquery {
                    query: Box::new(query),
                    alias,
                });
            }
            let inner = self.parse_table_ref()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        Ok(TableRef::Table { name, alias })
    }

    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let direction = self.parse_direction();
            let nulls = if self.consume_keyword(Keyword::Nulls) {
                if self.consume_keyword(Keyword::First) {
                    Some(NullOrdering::First)
                } else if self.consume_keyword(Keyword::Last) {
                    Some(NullOrdering::Last)
                } else {
                    return Err(self.unexpected("FIRST or LAST"));
                }
            } else {
                None
            };
            items.push(OrderBy {
                expr,
                direction,
                nulls,
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_direction(&mut self) -> Option<OrderDirection> {
        if self.consume_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.consume_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    // --- Data manipulation ---

    fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_object_name()?;

        // `(` starts either the column list or a parenthesized query
        let columns = if self.check(&TokenKind::LeftParen)
            && !matches!(
                self.peek_kind(),
                TokenKind::Keyword(Keyword::Select | Keyword::With)
            ) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let source = if self.consume_keyword(Keyword::Values) {
            let mut rows = vec![];
            loop {
                self.expect(&TokenKind::LeftParen)?;
                rows.push(self.parse_expression_list()?);
                self.expect(&TokenKind::RightParen)?;
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            InsertSource::Values(rows)
        } else if self.consume_keyword(Keyword::Default) {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else if self.starts_query() || self.check(&TokenKind::LeftParen) {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return Err(self.unexpected("VALUES, DEFAULT VALUES or a query"));
        };

        Ok(InsertStatement {
            table,
            columns,
            source,
        })
    }

    fn parse_update(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = vec![];
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expression(0)?;
            assignments.push(Assignment { column, value });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        let from = if self.consume_keyword(Keyword::From) {
            self.parse_table_refs()?
        } else {
            vec![]
        };

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(UpdateStatement {
            table,
            alias,
            assignments,
            from,
            where_clause,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };
        Ok(DeleteStatement {
            table,
            alias,
            where_clause,
        })
    }

    // --- Data definition ---

    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        if self.consume_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            self.expect_keyword(Keyword::View)?;
            return Ok(Statement::CreateView(self.parse_create_view(true)?));
        }

        match &self.current.kind {
            TokenKind::Keyword(Keyword::View) => {
                self.advance();
                Ok(Statement::CreateView(self.parse_create_view(false)?))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.expect_keyword(Keyword::Index)?;
                Ok(Statement::CreateIndex(self.parse_create_index(true)?))
            }
            TokenKind::Keyword(Keyword::Index) => {
                self.advance();
                Ok(Statement::CreateIndex(self.parse_create_index(false)?))
            }
            TokenKind::Keyword(Keyword::Temp | Keyword::Temporary) => {
                self.advance();
                self.expect_keyword(Keyword::Table)?;
                Ok(Statement::CreateTable(self.parse_create_table(true)?))
            }
            TokenKind::Keyword(Keyword::Table) => {
                self.advance();
                Ok(Statement::CreateTable(self.parse_create_table(false)?))
            }
            TokenKind::Keyword(kw @ (Keyword::Database | Keyword::Schema)) => {
                let object_type = if *kw == Keyword::Database {
                    ObjectType::Database
                } else {
                    ObjectType::Schema
                };
                self.advance();
                let if_not_exists = self.parse_if_not_exists()?;
                let name = self.parse_object_name()?;
                Ok(Statement::CreateDatabase(CreateDatabaseStatement {
                    object_type,
                    if_not_exists,
                    name,
                }))
            }
            _ => Err(self.unexpected("TABLE, VIEW, INDEX, DATABASE or SCHEMA")),
        }
    }

    fn parse_create_table(&mut self, temporary: bool) -> Result<CreateTableStatement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        let body = if self.consume_keyword(Keyword::As) {
            CreateTableBody::AsQuery(Box::new(self.parse_query()?))
        } else {
            let open = self.current.span;
            self.expect(&TokenKind::LeftParen)?;
            let mut columns = vec![];
            let mut constraints = vec![];
            loop {
                if self.starts_table_constraint() {
                    constraints.push(self.parse_table_constraint()?);
                } else {
                    columns.push(self.parse_column_def()?);
                }
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
            if columns.is_empty() {
                return Err(ParseError::new(
                    "a table needs at least one column",
                    open.merge(self.previous.span),
                ));
            }
            CreateTableBody::Columns {
                columns,
                constraints,
            }
        };

        Ok(CreateTableStatement {
            temporary,
            if_not_exists,
            name,
            body,
        })
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<CreateIndexStatement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_order_by_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(CreateIndexStatement {
            unique,
            if_not_exists,
            name,
            table,
            columns,
        })
    }

    fn parse_create_view(&mut self, or_replace: bool) -> Result<CreateViewStatement, ParseError> {
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        Ok(CreateViewStatement {
            or_replace,
            name,
            columns,
            query: Box::new(query),
        })
    }

    fn parse_drop(&mut self) -> Result<DropStatement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        let object_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Table) => ObjectType::Table,
            TokenKind::Keyword(Keyword::View) => ObjectType::View,
            TokenKind::Keyword(Keyword::Index) => ObjectType::Index,
            TokenKind::Keyword(Keyword::Database) => ObjectType::Database,
            TokenKind::Keyword(Keyword::Schema) => ObjectType::Schema,
            _ => return Err(self.unexpected("TABLE, VIEW, INDEX, DATABASE or SCHEMA")),
        };
        self.advance();
        let if_exists = self.parse_if_exists()?;
        let mut names = vec![self.parse_object_name()?];
        while self.consume(&TokenKind::Comma) {
            names.push(self.parse_object_name()?);
        }
        let behavior = self.parse_drop_behavior();
        Ok(DropStatement {
            object_type,
            if_exists,
            names,
            behavior,
        })
    }

    fn parse_drop_behavior(&mut self) -> Option<DropBehavior> {
        if self.consume_keyword(Keyword::Cascade) {
            Some(DropBehavior::Cascade)
        } else if self.consume_keyword(Keyword::Restrict) {
            Some(DropBehavior::Restrict)
        } else {
            None
        }
    }

    fn parse_alter_table(&mut self) -> Result<AlterTableStatement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_object_name()?;
        let mut operations = vec![];
        loop {
            operations.push(self.parse_alter_table_operation()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(AlterTableStatement { name, operations })
    }

    fn parse_alter_table_operation(&mut self) -> Result<AlterTableOperation, ParseError> {
        let token = self.current.clone();
        match token.kind {
            TokenKind::Keyword(Keyword::Add) => {
                self.advance();
                if self.starts_table_constraint() {
                    return Ok(AlterTableOperation::AddConstraint(
                        self.parse_table_constraint()?,
                    ));
                }
                self.consume_keyword(Keyword::Column);
                Ok(AlterTableOperation::AddColumn(self.parse_column_def()?))
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let if_exists = self.parse_if_exists()?;
                let name = self.expect_identifier()?;
                Ok(AlterTableOperation::DropColumn { name, if_exists })
            }
            TokenKind::Keyword(Keyword::Rename) => {
                self.advance();
                if self.consume_keyword(Keyword::To) {
                    return Ok(AlterTableOperation::RenameTable(self.parse_object_name()?));
                }
                self.consume_keyword(Keyword::Column);
                let old = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new = self.expect_identifier()?;
                Ok(AlterTableOperation::RenameColumn { old, new })
            }
            TokenKind::Keyword(Keyword::Alter) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let name = self.expect_identifier()?;
                let action = self.parse_alter_column_action()?;
                Ok(AlterTableOperation::AlterColumn { name, action })
            }
            TokenKind::Keyword(Keyword::Modify) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                Ok(AlterTableOperation::ModifyColumn(self.parse_column_def()?))
            }
            _ => Err(self.unexpected("ADD, DROP, RENAME, ALTER or MODIFY")),
        }
    }

    fn parse_alter_column_action(&mut self) -> Result<AlterColumnAction, ParseError> {
        if self.consume_keyword(Keyword::Set) {
            if self.consume_keyword(Keyword::Default) {
                return Ok(AlterColumnAction::SetDefault(
                    self.parse_expression(UNARY_BP)?,
                ));
            }
            if self.consume_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                return Ok(AlterColumnAction::SetNotNull);
            }
            self.expect_word("DATA")?;
            self.expect_word("TYPE")?;
            return Ok(AlterColumnAction::SetDataType(self.parse_data_type()?));
        }
        if self.consume_keyword(Keyword::Drop) {
            if self.consume_keyword(Keyword::Default) {
                return Ok(AlterColumnAction::DropDefault);
            }
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Null)?;
            return Ok(AlterColumnAction::DropNotNull);
        }
        // `TYPE t` (PostgreSQL) or a bare type (SQL Server)
        if self.check_word("TYPE") {
            self.advance();
        }
        Ok(AlterColumnAction::SetDataType(self.parse_data_type()?))
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_identifier()?;
        // SQLite allows a column without a declared type
        let data_type = if matches!(
            self.current.kind,
            TokenKind::Identifier { quoted: false, .. }
        ) {
            Some(self.parse_data_type()?)
        } else {
            None
        };
        let mut constraints = vec![];
        while let Some(constraint) = self.parse_column_constraint()? {
            constraints.push(constraint);
        }
        Ok(ColumnDef {
            name,
            data_type,
            constraints,
        })
    }

    fn parse_column_constraint(&mut self) -> Result<Option<NamedColumnConstraint>, ParseError> {
        let name = if self.consume_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let constraint = match &self.current.kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ColumnConstraint::PrimaryKey(self.parse_direction())
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                ColumnConstraint::NotNull
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                ColumnConstraint::Null
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.consume_keyword(Keyword::Key);
                ColumnConstraint::Unique
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                // Tighter than any binary operator so `DEFAULT 0 NOT NULL` stops at 0
                ColumnConstraint::Default(self.parse_expression(UNARY_BP)?)
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                ColumnConstraint::Check(self.parse_parenthesized_expression()?)
            }
            TokenKind::Keyword(Keyword::References) => {
                ColumnConstraint::References(self.parse_references()?)
            }
            TokenKind::Keyword(Keyword::Autoincrement) => {
                self.advance();
                ColumnConstraint::AutoIncrement { underscore: false }
            }
            TokenKind::Keyword(Keyword::AutoIncrement) => {
                self.advance();
                ColumnConstraint::AutoIncrement { underscore: true }
            }
            _ if name.is_some() => return Err(self.unexpected("column constraint")),
            _ => return Ok(None),
        };

        Ok(Some(NamedColumnConstraint { name, constraint }))
    }

    fn starts_table_constraint(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Keyword(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Check
                    | Keyword::Foreign
            )
        )
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let name = if self.consume_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let token = self.current.clone();
        let kind = match token.kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                TableConstraintKind::PrimaryKey(self.parse_parenthesized_identifiers()?)
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.consume_keyword(Keyword::Key);
                TableConstraintKind::Unique(self.parse_parenthesized_identifiers()?)
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                TableConstraintKind::Check(self.parse_parenthesized_expression()?)
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_identifiers()?;
                let references = self.parse_references()?;
                TableConstraintKind::ForeignKey {
                    columns,
                    references,
                }
            }
            _ => return Err(self.unexpected("PRIMARY KEY, UNIQUE, CHECK or FOREIGN KEY")),
        };

        Ok(TableConstraint { name, kind })
    }

    fn parse_references(&mut self) -> Result<ForeignKeyRef, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let mut on_delete = None;
        let mut on_update = None;
        while self.consume_keyword(Keyword::On) {
            if self.consume_keyword(Keyword::Delete) {
                on_delete = Some(self.parse_referential_action()?);
            } else if self.consume_keyword(Keyword::Update) {
                on_update = Some(self.parse_referential_action()?);
            } else {
                return Err(self.unexpected("DELETE or UPDATE"));
            }
        }

        Ok(ForeignKeyRef {
            table,
            columns,
            on_delete,
            on_update,
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.consume_keyword(Keyword::Cascade) {
            Ok(ReferentialAction::Cascade)
        } else if self.consume_keyword(Keyword::Restrict) {
            Ok(ReferentialAction::Restrict)
        } else if self.consume_keyword(Keyword::Set) {
            if self.consume_keyword(Keyword::Null) {
                Ok(ReferentialAction::SetNull)
            } else {
                self.expect_keyword(Keyword::Default)?;
                Ok(ReferentialAction::SetDefault)
            }
        } else if self.consume_keyword(Keyword::No) {
            self.expect_keyword(Keyword::Action)?;
            Ok(ReferentialAction::NoAction)
        } else {
            Err(self.unexpected("CASCADE, RESTRICT, SET NULL, SET DEFAULT or NO ACTION"))
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses a data type such as `INT`, `VARCHAR(255)` or `DOUBLE PRECISION`.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let start = self.current.span;
        let mut name = match &self.current.kind {
            TokenKind::Identifier {
                value,
                quoted: false,
            } => value.clone(),
            _ => return Err(self.unexpected("data type")),
        };
        self.advance();

        if name.eq_ignore_ascii_case("double") && self.check_word("PRECISION") {
            self.advance();
        } else if name.eq_ignore_ascii_case("character") && self.check_word("VARYING") {
            self.advance();
            name = String::from("VARCHAR");
        }

        let mut args = vec![];
        if self.consume(&TokenKind::LeftParen) {
            loop {
                args.push(self.parse_type_argument()?);
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        DataType::from_parts(&name, &args).ok_or_else(|| {
            ParseError::new(
                format!("too many arguments for type {}", name.to_ascii_uppercase()),
                start.merge(self.previous.span),
            )
        })
    }

    fn parse_type_argument(&mut self) -> Result<u32, ParseError> {
        if let TokenKind::Number(text) = &self.current.kind {
            if let Ok(value) = text.parse::<u32>() {
                self.advance();
                return Ok(value);
            }
        }
        Err(self.unexpected("type length"))
    }

    // --- Access control ---

    fn parse_grant(&mut self) -> Result<GrantStatement, ParseError> {
        self.expect_keyword(Keyword::Grant)?;
        let privileges = self.parse_privileges()?;
        self.expect_keyword(Keyword::On)?;
        let object = self.parse_grant_object()?;
        self.expect_keyword(Keyword::To)?;
        let grantees = self.parse_grantees()?;
        let with_grant_option = if self.consume_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Grant)?;
            self.expect_keyword(Keyword::Option)?;
            true
        } else {
            false
        };
        Ok(GrantStatement {
            privileges,
            object,
            grantees,
            with_grant_option,
        })
    }

    fn parse_revoke(&mut self) -> Result<RevokeStatement, ParseError> {
        self.expect_keyword(Keyword::Revoke)?;
        let privileges = self.parse_privileges()?;
        self.expect_keyword(Keyword::On)?;
        let object = self.parse_grant_object()?;
        self.expect_keyword(Keyword::From)?;
        let grantees = self.parse_grantees()?;
        let behavior = self.parse_drop_behavior();
        Ok(RevokeStatement {
            privileges,
            object,
            grantees,
            behavior,
        })
    }

    fn parse_privileges(&mut self) -> Result<Privileges, ParseError> {
        if self.consume_keyword(Keyword::All) {
            self.consume_keyword(Keyword::Privileges);
            return Ok(Privileges::All);
        }
        let mut actions = vec![];
        loop {
            let action = match &self.current.kind {
                TokenKind::Keyword(kw) if *kw != Keyword::On => kw.as_str().to_string(),
                TokenKind::Identifier {
                    value,
                    quoted: false,
                } => value.to_ascii_uppercase(),
                _ => return Err(self.unexpected("privilege")),
            };
            self.advance();
            actions.push(action);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Privileges::Actions(actions))
    }

    /// Parses `[TABLE] name`, where any part may be `*` (`shop.*`, `*.*`).
    fn parse_grant_object(&mut self) -> Result<ObjectName, ParseError> {
        self.consume_keyword(Keyword::Table);
        let mut parts = vec![];
        loop {
            if self.consume(&TokenKind::Star) {
                parts.push(String::from("*"));
            } else {
                parts.push(self.expect_identifier()?);
            }
            if !self.consume(&TokenKind::Dot) {
                break;
            }
        }
        Ok(ObjectName(parts))
    }

    fn parse_grantees(&mut self) -> Result<Vec<Grantee>, ParseError> {
        let mut grantees = vec![];
        loop {
            let grantee = if let TokenKind::String(user) = &self.current.kind {
                let user = user.clone();
                self.advance();
                if self.consume(&TokenKind::At) {
                    let host = match &self.current.kind {
                        TokenKind::String(host) => host.clone(),
                        _ => return Err(self.unexpected("host string")),
                    };
                    self.advance();
                    Grantee::UserHost { user, host }
                } else {
                    Grantee::Name(user)
                }
            } else {
                Grantee::Name(self.expect_identifier()?)
            };
            grantees.push(grantee);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(grantees)
    }

    // --- Transactions ---

    fn parse_transaction(&mut self) -> Result<TransactionStatement, ParseError> {
        let token = self.current.clone();
        self.advance();
        match token.kind {
            TokenKind::Keyword(Keyword::Begin) => {
                if !self.consume_keyword(Keyword::Transaction) {
                    self.consume_keyword(Keyword::Work);
                }
                Ok(TransactionStatement::Begin)
            }
            TokenKind::Keyword(Keyword::Start) => {
                self.expect_keyword(Keyword::Transaction)?;
                Ok(TransactionStatement::Start)
            }
            TokenKind::Keyword(Keyword::Commit) => {
                if !self.consume_keyword(Keyword::Transaction) {
                    self.consume_keyword(Keyword::Work);
                }
                Ok(TransactionStatement::Commit)
            }
            TokenKind::Keyword(Keyword::Rollback) => {
                if !self.consume_keyword(Keyword::Transaction) {
                    self.consume_keyword(Keyword::Work);
                }
                let savepoint = if self.consume_keyword(Keyword::To) {
                    self.consume_keyword(Keyword::Savepoint);
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(TransactionStatement::Rollback { savepoint })
            }
            TokenKind::Keyword(Keyword::Savepoint) => {
                Ok(TransactionStatement::Savepoint(self.expect_identifier()?))
            }
            TokenKind::Keyword(Keyword::Release) => {
                self.consume_keyword(Keyword::Savepoint);
                Ok(TransactionStatement::Release(self.expect_identifier()?))
            }
            _ => Err(ParseError::unexpected(
                "transaction statement",
                token.kind,
                token.span,
            )),
        }
    }

    // --- Expressions ---

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        // Parse prefix (primary expression or unary operator)
        let mut lhs = self.parse_prefix()?;

        // Parse infix operators
        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let token = self.current.clone();
            lhs = match token.kind {
                TokenKind::Keyword(Keyword::Is) => self.parse_is(lhs)?,
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.parse_predicate(lhs, true, r_bp)?
                }
                TokenKind::Keyword(Keyword::In | Keyword::Between | Keyword::Like) => {
                    self.parse_predicate(lhs, false, r_bp)?
                }
                TokenKind::DoubleColon => {
                    if !self.dialect.supports_double_colon_cast() {
                        return Err(ParseError::new(
                            format!(
                                "`::` casts are not supported by the {} dialect",
                                self.dialect.name()
                            ),
                            token.span,
                        ));
                    }
                    self.advance();
                    Expr::Cast {
                        expr: Box::new(lhs),
                        data_type: self.parse_data_type()?,
                        shorthand: true,
                    }
                }
                ref kind => {
                    let Some(op) = token_to_binary_op(kind) else {
                        break;
                    };
                    self.advance();
                    if op.is_comparison() {
                        if let Some(quantifier) = self.parse_quantifier() {
                            self.expect(&TokenKind::LeftParen)?;
                            let query = self.parse_query()?;
                            self.expect(&TokenKind::RightParen)?;
                            lhs = Expr::Quantified {
                                left: Box::new(lhs),
                                op,
                                quantifier,
                                query: Box::new(query),
                            };
                            continue;
                        }
                    }
                    let rhs = self.parse_expression(r_bp)?;
                    lhs.binary(op, rhs)
                }
            };
        }

        Ok(lhs)
    }

    /// Consumes `ANY`, `SOME` or `ALL` when followed by `(`.
    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let quantifier = match self.current.kind {
            TokenKind::Keyword(Keyword::Any) => Quantifier::Any,
            TokenKind::Keyword(Keyword::Some) => Quantifier::Some,
            TokenKind::Keyword(Keyword::All) => Quantifier::All,
            _ => return None,
        };
        if self.peek_kind() != TokenKind::LeftParen {
            return None;
        }
        self.advance();
        Some(quantifier)
    }

    fn parse_is(&mut self, lhs: Expr) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Is)?;
        let negated = self.consume_keyword(Keyword::Not);
        let expr = Box::new(lhs);
        let value = match self.current.kind {
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                return Ok(Expr::IsNull { expr, negated });
            }
            TokenKind::Keyword(Keyword::True) => true,
            TokenKind::Keyword(Keyword::False) => false,
            _ => return Err(self.unexpected("NULL, TRUE or FALSE")),
        };
        self.advance();
        Ok(Expr::IsBool {
            expr,
            value,
            negated,
        })
    }

    /// Parses the rest of `[NOT] IN`, `[NOT] BETWEEN` or `[NOT] LIKE`.
    fn parse_predicate(&mut self, lhs: Expr, negated: bool, r_bp: u8) -> Result<Expr, ParseError> {
        let expr = Box::new(lhs);
        if self.consume_keyword(Keyword::In) {
            self.expect(&TokenKind::LeftParen)?;
            if self.starts_query() {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expr::InSubquery {
                    expr,
                    query: Box::new(query),
                    negated,
                });
            }
            let list = self.parse_expression_list()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::InList {
                expr,
                list,
                negated,
            });
        }
        if self.consume_keyword(Keyword::Between) {
            let low = self.parse_expression(r_bp)?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_expression(r_bp)?;
            return Ok(Expr::Between {
                expr,
                low: Box::new(low),
                high: Box::new(high),
                negated,
            });
        }
        if self.consume_keyword(Keyword::Like) {
            let pattern = self.parse_expression(r_bp)?;
            let escape = if self.consume_keyword(Keyword::Escape) {
                Some(Box::new(self.parse_expression(r_bp)?))
            } else {
                None
            };
            return Ok(Expr::Like {
                expr,
                pattern: Box::new(pattern),
                escape,
                negated,
            });
        }
        Err(self.unexpected("IN, BETWEEN or LIKE"))
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Not)
            && self.peek_kind() == TokenKind::Keyword(Keyword::Exists)
        {
            self.advance();
            return self.parse_exists(true);
        }

        // Check for unary operators
        if let Some(op) = token_to_unary_op(&self.current.kind) {
            let bp = prefix_binding_power(&self.current.kind).unwrap_or(UNARY_BP);
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();

        match token.kind {
            // Literals
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(n)))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::Literal(Literal::String(s)))
            }
            TokenKind::Blob(b) => {
                self.advance();
                Ok(Expr::Literal(Literal::Blob(b)))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }

            // Parameter placeholders
            TokenKind::Placeholder(p) => {
                self.advance();
                Ok(Expr::Parameter(p))
            }

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard { table: None })
            }

            // Parenthesized expression or subquery
            TokenKind::LeftParen => {
                self.advance();
                if self.starts_query() {
                    let subquery = self.parse_query()?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Subquery(Box::new(subquery)))
                } else {
                    let expr = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(Expr::Paren(Box::new(expr)))
                }
            }

            TokenKind::Keyword(Keyword::Exists) => self.parse_exists(false),
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast_expression(),

            // LEFT(s, n) and RIGHT(s, n) share their names with join keywords
            TokenKind::Keyword(kw @ (Keyword::Left | Keyword::Right))
                if self.peek_kind() == TokenKind::LeftParen =>
            {
                self.advance();
                self.parse_function_call(kw.as_str().to_string())
            }

            TokenKind::Identifier { .. } => self.parse_identifier_expression(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => self.parse_identifier_expression(),

            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses a column reference, qualified wildcard, function call or
    /// typed string literal starting at an identifier.
    fn parse_identifier_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span;
        let quoted = matches!(self.current.kind, TokenKind::Identifier { quoted: true, .. });
        let first = self.expect_identifier()?;

        if !quoted {
            if self.check(&TokenKind::LeftParen) {
                return self.parse_function_call(first);
            }
            if let TokenKind::String(value) = &self.current.kind {
                let upper = first.to_ascii_uppercase();
                if matches!(upper.as_str(), "DATE" | "TIME" | "TIMESTAMP") {
                    let value = value.clone();
                    self.advance();
                    let data_type = DataType::from_parts(&upper, &[])
                        .unwrap_or(DataType::Custom {
                            name: upper,
                            args: vec![],
                        });
                    return Ok(Expr::TypedString { data_type, value });
                }
            }
        }

        let mut parts = vec![first];
        while self.consume(&TokenKind::Dot) {
            if self.consume(&TokenKind::Star) {
                return Ok(Expr::Wildcard { table: parts.pop() });
            }
            parts.push(self.expect_identifier()?);
        }

        let name = parts.pop().unwrap_or_default();
        Ok(Expr::Column {
            qualifier: parts,
            name,
            span: start.merge(self.previous.span),
        })
    }

    /// Parses a function call after its name.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        if name.eq_ignore_ascii_case("extract") {
            return self.parse_extract();
        }

        let distinct = if self.consume_keyword(Keyword::Distinct) {
            true
        } else {
            self.consume_keyword(Keyword::All);
            false
        };

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen)?;

        let over = if self.consume_keyword(Keyword::Over) {
            Some(self.parse_window_spec()?)
        } else {
            None
        };

        Ok(Expr::Function(FunctionCall {
            name,
            args,
            distinct,
            over,
        }))
    }

    /// Parses `field FROM expr)` of an `EXTRACT` call.
    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        let field = self.expect_identifier()?.to_ascii_uppercase();
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Extract {
            field,
            expr: Box::new(expr),
        })
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let partition_by = if self.consume_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };
        let order_by = if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(WindowSpec {
            partition_by,
            order_by,
        })
    }

    fn parse_exists(&mut self, negated: bool) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Exists)?;
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_query()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Exists {
            query: Box::new(query),
            negated,
        })
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
            shorthand: false,
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE has an operand before the first WHEN
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        let mut when_clauses = vec![];
        while self.consume_keyword(Keyword::When) {
            let when = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_expression(0)?;
            when_clauses.push((when, then));
        }
        if when_clauses.is_empty() {
            return Err(self.unexpected("WHEN"));
        }

        let else_clause = if self.consume_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    fn parse_parenthesized_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs)
    }

    /// Parses `(a, b, c)`.
    fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut idents = vec![];
        loop {
            idents.push(self.expect_identifier()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    /// Parses a dotted name such as `shop.customers`.
    fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut parts = vec![self.expect_identifier()?];
        while self.consume(&TokenKind::Dot) {
            parts.push(self.expect_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Returns the kind of the token after the current one.
    fn peek_kind(&self) -> TokenKind {
        self.lexer.clone().next_token().kind
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is the unquoted word `word`.
    ///
    /// Used for words such as `TYPE` that are meaningful in one position
    /// but are not keywords.
    fn check_word(&self, word: &str) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Identifier { value, quoted: false } if value.eq_ignore_ascii_case(word)
        )
    }

    fn starts_query(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::Select | Keyword::With)
        )
    }

    /// Advances past the current token if it matches the given kind.
    fn consume(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Advances past the current token if it is the given keyword.
    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.check_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    /// Expects and returns an identifier.
    ///
    /// Non-reserved keywords are accepted and keep their source spelling.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier { value, .. } => value.clone(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => self
                .current
                .span
                .slice(self.source)
                .map_or_else(|| kw.as_str().to_string(), str::to_string),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::dialect::{MySqlDialect, PostgresDialect};

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    fn select_of(stmt: &Statement) -> &SelectStatement {
        match stmt {
            Statement::Query(query) => query.as_select().expect("single select block"),
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT id, name FROM users").unwrap();
        assert_eq!(select_of(&stmt).columns.len(), 2);
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let stmt = parse("SELECT 1 + 2 * 3").unwrap();
        if let Expr::Binary { op, right, .. } = &select_of(&stmt).columns[0].expr {
            assert_eq!(*op, BinaryOp::Add);
            assert!(matches!(
                right.as_ref(),
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected binary expression");
        }
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let stmt = parse("SELECT * FROM t WHERE NOT a = 1 AND b = 2").unwrap();
        let Some(Expr::Binary { left, op, .. }) = &select_of(&stmt).where_clause else {
            panic!("expected AND");
        };
        assert_eq!(*op, BinaryOp::And);
        assert!(matches!(
            left.as_ref(),
            Expr::Unary {
                op: crate::ast::UnaryOp::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_non_reserved_keyword_as_column() {
        let stmt = parse("SELECT first, key FROM t").unwrap();
        let columns = &select_of(&stmt).columns;
        assert!(matches!(&columns[0].expr, Expr::Column { name, .. } if name == "first"));
        assert!(matches!(&columns[1].expr, Expr::Column { name, .. } if name == "key"));
    }

    #[test]
    fn test_script_tracks_termination() {
        let statements = Parser::new("SELECT 1;; SELECT 2").parse_script().unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].terminated);
        assert!(!statements[1].terminated);
        assert_eq!(statements[1].span, Span::new(11, 19));
    }

    #[test]
    fn test_limit_comma_depends_on_dialect() {
        assert!(parse("SELECT * FROM t LIMIT 5, 10").is_err());
        let stmt = Parser::with_dialect("SELECT * FROM t LIMIT 5, 10", &MySqlDialect)
            .parse_statement()
            .unwrap();
        assert_eq!(stmt.to_string(), "SELECT * FROM t LIMIT 10 OFFSET 5");
    }

    #[test]
    fn test_double_colon_depends_on_dialect() {
        let err = parse("SELECT price::int FROM products").unwrap_err();
        assert!(err.message.contains("generic dialect"), "{err}");
        let stmt = Parser::with_dialect("SELECT price::int FROM products", &PostgresDialect)
            .parse_statement()
            .unwrap();
        assert_eq!(stmt.to_string(), "SELECT price::INTEGER FROM products");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("SELECT 1 2").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("end of input"));
        assert_eq!(err.span, Span::new(9, 10));
    }
}
