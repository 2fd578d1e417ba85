/// Statement interpreter - recursive-descent parser that executes as it goes
///
/// One method per grammar rule. Each consumes exactly the tokens of its rule
/// and either returns the rule's value or performs its effect. Statements
/// only touch the catalog after their closing `;` has been consumed, so a
/// statement that fails to parse leaves the catalog unchanged.
///
/// Comma-separated lists are parsed with an item routine that also reports
/// whether it consumed a trailing `,` ([`Separator`]). The caller checks that
/// report against the next token right away: a comma followed by the list's
/// terminator is dangling, and no comma followed by anything else is a
/// missing separator.
use super::condition::{Condition, Relation};
use super::executor::QueryExecutor;
use super::token::TokenType;
use super::tokenizer::TokenSource;
use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::error::{DbError, Result};
use crate::storage;
use crate::types::{Column, Row, Table, TableIterator, UnresolvedColumn};
use std::io::Write;
use tracing::{debug, info, warn};

/// Name given to the result of a top-level `select`.
const SELECT_RESULT_NAME: &str = "(select)";

/// Whether the session should keep reading statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// What a list-item routine found right after the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    /// A `,` was consumed; another item must follow.
    Comma,
    /// No `,`; the list's terminator must follow.
    None,
}

impl Separator {
    /// Decide, right after a list item, whether the list goes on. `at_end`
    /// says whether the next token is the list's terminator.
    fn continues(self, at_end: bool, terminator: &str) -> Result<bool> {
        match (self, at_end) {
            (Separator::Comma, false) => Ok(true),
            (Separator::None, true) => Ok(false),
            (Separator::Comma, true) => Err(DbError::commas(format!(
                "check commas: dangling ',' before {}",
                terminator
            ))),
            (Separator::None, false) => Err(DbError::commas(format!(
                "check commas: expected ',' or {}",
                terminator
            ))),
        }
    }
}

/// Right-hand side of a condition before resolution.
enum Operand {
    Column(UnresolvedColumn),
    Literal(String),
}

struct UnresolvedCondition {
    left: UnresolvedColumn,
    relation: Relation,
    right: Operand,
}

impl UnresolvedCondition {
    fn resolve(self, iterators: &[TableIterator<'_>]) -> Result<Condition> {
        let left = self.left.resolve(iterators)?;
        let right = match self.right {
            Operand::Column(column) => column.resolve(iterators)?,
            Operand::Literal(value) => Column::constant(value),
        };
        Ok(Condition::new(left, self.relation, right))
    }
}

pub struct Interpreter<S, W> {
    input: S,
    out: W,
    catalog: Catalog,
    config: SessionConfig,
}

impl<S: TokenSource, W: Write> Interpreter<S, W> {
    pub fn new(input: S, out: W, config: SessionConfig) -> Self {
        Self::with_catalog(input, out, config, Catalog::new())
    }

    pub fn with_catalog(input: S, out: W, config: SessionConfig, catalog: Catalog) -> Self {
        Self {
            input,
            out,
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.out)
    }

    /// Execute statements until exit/quit or end of input. A failing
    /// statement is reported as `Error: <message>` and skipped; only I/O
    /// failures on the session's own input or output end the run.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.statement() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(DbError::Io(e)) => return Err(DbError::Io(e)),
                Err(e) => {
                    warn!(error = %e, "statement aborted");
                    writeln!(self.out, "Error: {}", e)?;
                    self.skip_command();
                }
            }
        }
        debug!(tables = ?self.catalog.names(), "session finished");
        Ok(())
    }

    /// Parse and execute one statement.
    pub fn statement(&mut self) -> Result<Flow> {
        let kind = self.input.peek()?.token_type.clone();
        debug!(statement = %kind, "statement");
        match kind {
            TokenType::Create => self.create_statement()?,
            TokenType::Load => self.load_statement()?,
            TokenType::Store => self.store_statement()?,
            TokenType::Insert => self.insert_statement()?,
            TokenType::Print => self.print_statement()?,
            TokenType::Select => self.select_statement()?,
            TokenType::Exit | TokenType::Quit => {
                self.exit_statement()?;
                return Ok(Flow::Stop);
            }
            TokenType::Eof => return Ok(Flow::Stop),
            _ => {
                // Consume it so recovery makes progress.
                let token = self.input.next()?;
                return Err(DbError::syntax(format!(
                    "unrecognizable command '{}' at line {} column {}",
                    token.token_type, token.line, token.column
                )));
            }
        }
        Ok(Flow::Continue)
    }

    /// Discard tokens through the next `;` or end of input. Lexical errors
    /// met along the way are ignored.
    pub fn skip_command(&mut self) {
        if self.input.at_statement_start() {
            return;
        }
        loop {
            match self.input.next() {
                Ok(token) => {
                    if matches!(token.token_type, TokenType::Semicolon | TokenType::Eof) {
                        return;
                    }
                }
                Err(DbError::Io(_)) => return,
                Err(_) => {}
            }
        }
    }

    /// create table <name> <table definition> ;
    fn create_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Create)?;
        self.input.expect(&TokenType::Table)?;
        let name = self.name()?;
        let table = self.table_definition(&name)?;
        self.input.expect(&TokenType::Semicolon)?;
        info!(table = %name, columns = table.column_count(), rows = table.len(), "table created");
        self.catalog.insert(table);
        Ok(())
    }

    /// exit ; | quit ;
    fn exit_statement(&mut self) -> Result<()> {
        if !self.input.next_if(&TokenType::Quit)? {
            self.input.expect(&TokenType::Exit)?;
        }
        self.input.expect(&TokenType::Semicolon)?;
        Ok(())
    }

    /// insert into <table name> values <literal> [, <literal>]* ;
    fn insert_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Insert)?;
        self.input.expect(&TokenType::Into)?;
        let name = self.table_name()?;
        self.input.expect(&TokenType::Values)?;

        let mut values = Vec::new();
        loop {
            let (value, sep) = self.literal_item()?;
            values.push(value);
            let at_end = self.input.peek_is(&TokenType::Semicolon)?;
            if sep.continues(at_end, "';'")? {
                continue;
            }
            break;
        }
        self.input.expect(&TokenType::Semicolon)?;

        let table = self.catalog.table_mut(&name)?;
        let added = table.add(Row::new(values))?;
        debug!(table = %name, added, "insert");
        Ok(())
    }

    /// load <name> ;
    fn load_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Load)?;
        let name = self.name()?;
        self.input.expect(&TokenType::Semicolon)?;

        let table = storage::read_table(&self.config.table_path(&name), &name)?;
        self.catalog.insert(table);
        writeln!(self.out, "Loaded {}.db", name)?;
        Ok(())
    }

    /// store <table name> ;
    fn store_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Store)?;
        let name = self.table_name()?;
        self.input.expect(&TokenType::Semicolon)?;

        let table = self.catalog.table(&name)?;
        storage::write_table(&self.config.table_path(&name), table)?;
        writeln!(self.out, "Stored {}.db", name)?;
        Ok(())
    }

    /// print <table name> ;
    fn print_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Print)?;
        let name = self.name()?;
        self.input.expect(&TokenType::Semicolon)?;

        let table = self
            .catalog
            .get(&name)
            .ok_or_else(|| DbError::TableDoesNotExist(name.clone()))?;
        writeln!(self.out, "Contents of {}:", name)?;
        table.print(&mut self.out)?;
        Ok(())
    }

    /// select <select clause> ;
    fn select_statement(&mut self) -> Result<()> {
        self.input.expect(&TokenType::Select)?;
        let table = self.select_clause(SELECT_RESULT_NAME)?;
        self.input.expect(&TokenType::Semicolon)?;

        writeln!(self.out, "Search results:")?;
        table.print(&mut self.out)?;
        Ok(())
    }

    /// `( <name> [, <name>]* )` or `as select <select clause>`, producing a
    /// new table called `name`.
    fn table_definition(&mut self, name: &str) -> Result<Table> {
        if self.input.next_if(&TokenType::LParen)? {
            let mut titles = Vec::new();
            loop {
                let (title, sep) = self.name_item()?;
                titles.push(title);
                let at_end = self.input.peek_is(&TokenType::RParen)?;
                if sep.continues(at_end, "')'")? {
                    continue;
                }
                break;
            }
            self.input.expect(&TokenType::RParen)?;
            Table::new(name, titles)
        } else if self.input.next_if(&TokenType::As)? {
            self.input.expect(&TokenType::Select)?;
            self.select_clause(name)
        } else {
            let token = self.input.peek()?;
            Err(DbError::syntax(format!(
                "expected '(' or 'as select' after table name at line {} column {}",
                token.line, token.column
            )))
        }
    }

    /// Parse a select clause and run it, returning a fresh table called
    /// `table_name`:
    ///
    /// `<selector> [, <selector>]* [as <name>] from <table> [, <table>]
    /// [where <condition> [and <condition>]*]`
    fn select_clause(&mut self, table_name: &str) -> Result<Table> {
        let mut selectors = Vec::new();
        loop {
            let (selector, sep) = self.column_selector()?;
            selectors.push(selector);
            let at_end = self.input.peek_is(&TokenType::As)?
                || self.input.peek_is(&TokenType::From)?;
            if sep.continues(at_end, "'from'")? {
                continue;
            }
            break;
        }

        let mut titles: Vec<String> = selectors.iter().map(|s| s.name().to_string()).collect();
        if self.input.next_if(&TokenType::As)? {
            let (alias, sep) = self.name_item()?;
            if sep == Separator::Comma {
                return Err(DbError::commas("check commas: ',' after column alias"));
            }
            if let Some(last) = titles.last_mut() {
                *last = alias;
            }
        }

        self.input.expect(&TokenType::From)?;
        let sources = self.source_tables()?;

        let conditions = if self.input.next_if(&TokenType::Where)? {
            self.condition_clause()?
        } else {
            Vec::new()
        };

        let tables = sources
            .iter()
            .map(|name| self.catalog.table(name))
            .collect::<Result<Vec<_>>>()?;
        let iterators: Vec<TableIterator<'_>> = tables.iter().map(|t| t.iterator()).collect();
        let columns = selectors
            .into_iter()
            .map(|s| s.resolve(&iterators))
            .collect::<Result<Vec<_>>>()?;
        let conditions = conditions
            .into_iter()
            .map(|c| c.resolve(&iterators))
            .collect::<Result<Vec<_>>>()?;

        let mut result = Table::new(table_name, titles)?;
        QueryExecutor::new(iterators, columns, conditions)?.execute(&mut result)?;
        Ok(result)
    }

    /// `<table> [, <table>]` after `from`. The list ends at `where` or `;`.
    fn source_tables(&mut self) -> Result<Vec<String>> {
        let (first, sep) = self.table_item()?;
        let mut sources = vec![first];

        let at_end = self.input.peek_is(&TokenType::Where)?
            || self.input.peek_is(&TokenType::Semicolon)?;
        match (sep, at_end) {
            (Separator::None, true) => {}
            (Separator::Comma, true) => {
                return Err(DbError::commas("check commas: dangling ',' after table name"));
            }
            (Separator::None, false) => {
                if self.input.peek_is(&TokenType::Identifier(String::new()))? {
                    return Err(DbError::commas("use commas to separate tables"));
                }
                let token = self.input.peek()?;
                return Err(DbError::syntax(format!(
                    "expected 'where' or ';' but found '{}' at line {} column {}",
                    token.token_type, token.line, token.column
                )));
            }
            (Separator::Comma, false) => {
                let (second, sep) = self.table_item()?;
                if sep == Separator::Comma {
                    return Err(DbError::commas("check commas: at most two tables may follow 'from'"));
                }
                sources.push(second);
            }
        }
        Ok(sources)
    }

    /// `<condition> [and <condition>]*`, up to the closing `;`. A missing
    /// `and` between two conditions is tolerated.
    fn condition_clause(&mut self) -> Result<Vec<UnresolvedCondition>> {
        let mut conditions = Vec::new();
        loop {
            conditions.push(self.condition()?);
            if self.input.next_if(&TokenType::And)? {
                continue;
            }
            if self.input.peek_is(&TokenType::Semicolon)? || self.input.peek_is(&TokenType::Eof)? {
                break;
            }
        }
        Ok(conditions)
    }

    /// `<selector> <relation> <selector>` or `<selector> <relation> <literal>`
    fn condition(&mut self) -> Result<UnresolvedCondition> {
        let left = self.column()?;
        let token = self.input.next()?;
        let relation = match token.token_type {
            TokenType::Relation(op) => op.parse::<Relation>()?,
            other => return Err(DbError::InvalidRelation(other.to_string())),
        };
        let right = if matches!(self.input.peek()?.token_type, TokenType::Literal(_)) {
            Operand::Literal(self.literal()?)
        } else {
            Operand::Column(self.column()?)
        };
        Ok(UnresolvedCondition { left, relation, right })
    }

    fn separator(&mut self) -> Result<Separator> {
        if self.input.next_if(&TokenType::Comma)? {
            Ok(Separator::Comma)
        } else {
            Ok(Separator::None)
        }
    }

    fn name_item(&mut self) -> Result<(String, Separator)> {
        let name = self.name()?;
        Ok((name, self.separator()?))
    }

    fn literal_item(&mut self) -> Result<(String, Separator)> {
        let value = self.literal()?;
        Ok((value, self.separator()?))
    }

    fn table_item(&mut self) -> Result<(String, Separator)> {
        let name = self.table_name()?;
        Ok((name, self.separator()?))
    }

    fn column_selector(&mut self) -> Result<(UnresolvedColumn, Separator)> {
        let column = self.column()?;
        Ok((column, self.separator()?))
    }

    /// `[<table>.]<column>`. A qualifying table must be in the catalog.
    fn column(&mut self) -> Result<UnresolvedColumn> {
        let first = self.name()?;
        if self.input.next_if(&TokenType::Dot)? {
            if !self.catalog.contains(&first) {
                return Err(DbError::UnknownTable(first));
            }
            let column = self.name()?;
            Ok(UnresolvedColumn::new(Some(first), column))
        } else {
            Ok(UnresolvedColumn::new(None, first))
        }
    }

    /// A name of a table already in the catalog.
    fn table_name(&mut self) -> Result<String> {
        let name = self.name()?;
        if !self.catalog.contains(&name) {
            return Err(DbError::UnknownTable(name));
        }
        Ok(name)
    }

    fn name(&mut self) -> Result<String> {
        match self.input.expect(&TokenType::Identifier(String::new()))?.token_type {
            TokenType::Identifier(name) => Ok(name),
            other => Err(DbError::syntax(format!("expected a name, found '{}'", other))),
        }
    }

    fn literal(&mut self) -> Result<String> {
        match self.input.expect(&TokenType::Literal(String::new()))?.token_type {
            TokenType::Literal(value) => Ok(value),
            other => Err(DbError::syntax(format!("expected a literal, found '{}'", other))),
        }
    }
}
