use std::collections::HashMap;

use crate::{
    analyzer::context::{Context, EntityId},
    ast::statements::Program,
};

use super::{stdlib, stmt::gen_statement_list};

/// Receives generated JavaScript one line at a time, in final order.
pub trait LineSink {
    fn line(&mut self, line: String);
}

impl LineSink for Vec<String> {
    fn line(&mut self, line: String) {
        self.push(line);
    }
}

/// The state threaded through generation: the analysis context for
/// resolving referent handles, the output sink, and the memoized
/// entity-to-name table.
pub struct Generator<'a> {
    context: &'a Context,
    sink: &'a mut dyn LineSink,
    indent_unit: String,
    names: HashMap<EntityId, String>,
    next_suffix: usize,
}

impl<'a> Generator<'a> {
    pub fn new(context: &'a Context, sink: &'a mut dyn LineSink, indent_unit: &str) -> Self {
        Generator {
            context,
            sink,
            indent_unit: String::from(indent_unit),
            names: HashMap::new(),
            next_suffix: 1,
        }
    }

    pub fn get_context(&self) -> &'a Context {
        self.context
    }

    /// The hygienic JavaScript name for an entity: its source name plus a
    /// numeric suffix from a counter that never repeats. Two distinct
    /// entities can never collide, whatever scopes they came from, and
    /// asking twice for the same entity returns the same name.
    pub fn js_name(&mut self, id: EntityId) -> String {
        if let Some(name) = self.names.get(&id) {
            return name.clone();
        }

        let name = format!("{}_{}", self.context.entity(id).name, self.next_suffix);
        self.next_suffix += 1;
        self.names.insert(id, name.clone());
        name
    }

    pub fn emit(&mut self, indent_level: usize, line: String) {
        let mut text = String::new();
        for _ in 0..indent_level {
            text.push_str(&self.indent_unit);
        }
        text.push_str(&line);
        self.sink.line(text);
    }
}

/// The JavaScript spelling of a source operator.
pub fn make_op(op: &str) -> &str {
    match op {
        "not" => "!",
        "and" => "&&",
        "or" => "||",
        "==" => "===",
        "!=" => "!==",
        other => other,
    }
}

/// Emits the whole program: the builtin library first, then every
/// top-level statement at indent level zero.
pub fn generate(program: &Program, context: &Context, sink: &mut dyn LineSink, indent_unit: &str) {
    let mut generator = Generator::new(context, sink, indent_unit);
    stdlib::generate_library(&mut generator);
    gen_statement_list(&mut generator, &program.block.statements, 0);
}
