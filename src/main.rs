use std::{
    env,
    fs::{self, create_dir, read_to_string},
    path::PathBuf,
    rc::Rc,
    time::Instant,
};

use larkc::{
    analyzer::analyzer::analyze, codegen::codegen::generate, display_error,
    lexer::lexer::tokenize, optimizer::optimizer::optimize_program, parser::parser::parse,
};

fn main() {
    if !PathBuf::from("build").exists() {
        create_dir("build").unwrap();
    } else {
        for entry in fs::read_dir("build").unwrap() {
            let entry = entry.unwrap();
            fs::remove_file(entry.path()).unwrap();
        }
    }

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let mut full_path = env::current_dir().unwrap();
    full_path.push(file_path);
    let file_contents = read_to_string(full_path.clone()).expect("Failed to read file!");

    let tokens = match tokenize(file_contents, Some(String::from(file_name))) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, full_path);
            panic!()
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let mut program = match parse(tokens, Rc::new(String::from(file_name))) {
        Ok(program) => program,
        Err(error) => {
            display_error(error, full_path);
            panic!()
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let analyze_start = Instant::now();
    let context = match analyze(&mut program) {
        Ok(context) => context,
        Err(error) => {
            display_error(error, full_path);
            panic!()
        }
    };

    println!("Analyzed in {:?}", analyze_start.elapsed());

    let optimize_start = Instant::now();
    let program = optimize_program(program);
    println!("Optimized in {:?}", optimize_start.elapsed());

    let generate_start = Instant::now();
    let mut lines: Vec<String> = vec![];
    generate(&program, &context, &mut lines, "    ");
    println!("Generated in {:?}", generate_start.elapsed());

    fs::write("build/out.js", lines.join("\n") + "\n").expect("Failed to write output file");

    println!("Total time: {:?}", start.elapsed());
}
