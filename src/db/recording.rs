use crate::binder::{PlaceholderStyle, QueryAssembly};
use crate::db::{prepare, EngineError, QueryExecutor};


/// Keeps every statement it is handed, already verified and in its target
/// placeholder style, and touches no database.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    style: PlaceholderStyle,
    statements: Vec<QueryAssembly>,
}

impl RecordingExecutor {
    pub fn new(style: PlaceholderStyle) -> Self {
        RecordingExecutor { style, statements: vec![] }
    }

    pub fn statements(&self) -> &[QueryAssembly] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<QueryAssembly> {
        self.statements
    }
}

#[async_trait::async_trait]
impl QueryExecutor for RecordingExecutor {
    fn style(&self) -> PlaceholderStyle {
        self.style
    }

    async fn execute(&mut self, assembly: &QueryAssembly) -> Result<u64, EngineError> {
        let statement = prepare(assembly, self.style)?;
        self.statements.push(statement);
        Ok(0)
    }

    async fn fetch_column(&mut self, assembly: &QueryAssembly) -> Result<Vec<Option<String>>, EngineError> {
        let statement = prepare(assembly, self.style)?;
        self.statements.push(statement);
        Ok(vec![])
    }
}
