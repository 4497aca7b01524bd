#![allow(clippy::module_inception)]

use std::{fs, path::PathBuf, rc::Rc};

use crate::{
    codegen::codegen::LineSink,
    errors::errors::{Error, ErrorTip},
};

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Runs the whole pipeline on one source string: tokenize, parse, analyze,
/// optimize, generate. Generated JavaScript lines are handed to `sink` one
/// at a time; the first semantic violation aborts before any output.
pub fn compile(
    source: String,
    file: Option<String>,
    sink: &mut dyn LineSink,
    indent_unit: &str,
) -> Result<(), Error> {
    let file_name = file.clone().unwrap_or_else(|| String::from("shell"));

    let tokens = lexer::lexer::tokenize(source, file)?;
    let mut program = parser::parser::parse(tokens, Rc::new(file_name))?;
    let context = analyzer::analyzer::analyze(&mut program)?;
    let program = optimizer::optimizer::optimize_program(program);
    codegen::codegen::generate(&program, &context, sink, indent_unit);

    Ok(())
}

pub fn get_line_at_position(file: PathBuf, position: u32) -> (usize, String, usize) {
    let content = fs::read_to_string(&file).unwrap();
    let pos = position as usize;

    if pos >= content.len() {
        panic!("Position exceeds file length");
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    panic!("Failed to find line containing position");
}


pub fn display_error(error: Error, file: PathBuf) {
    /*
        error: message
        -> final.lark
           |
        20 | a := #
           | -----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(file.clone(), position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
