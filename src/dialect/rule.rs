/// Grammar rules of the built-in dialect, named after the constructs they
/// recognize. The parser keeps a stack of active rules; candidate collection
/// reports the outermost preferred rule on that stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    File,
    Statement,
    SelectStatement,
    WithClause,
    CommonTableExpression,
    QueryExpression,
    QuerySpecification,
    SelectList,
    ColumnElem,
    ColumnAlias,
    TableSources,
    TableSource,
    TableSourceItem,
    TableName,
    FullTableName,
    TableAlias,
    JoinPart,
    Expression,
    FullColumnName,
    FunctionCall,
    CaseExpression,
    Subquery,
    GroupByClause,
    OrderByClause,
    OrderByElem,
    InsertStatement,
    UpdateStatement,
    UpdateElem,
    DeleteStatement,
    ColumnNameList,
}

impl Rule {
    /// Positions where a table name goes.
    pub const TABLE: &'static [Rule] = &[Rule::TableName, Rule::FullTableName];

    /// Positions where a column name goes.
    pub const COLUMN: &'static [Rule] = &[Rule::FullColumnName, Rule::ColumnNameList];

    /// Rules the grammar recurses through. Every unbounded descent passes
    /// through one of them.
    pub const fn nests(self) -> bool {
        matches!(
            self,
            Rule::Expression | Rule::Subquery | Rule::CommonTableExpression
        )
    }
}
