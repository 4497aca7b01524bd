use crate::ast::statements::{BindingStmt, FnDeclStmt, IfStmt, Stmt, WhileStmt};

use super::{codegen::Generator, expr::gen_expression};

pub fn gen_statement_list(generator: &mut Generator, statements: &[Stmt], indent_level: usize) {
    for stmt in statements {
        gen_statement(generator, stmt, indent_level);
    }
}

pub fn gen_statement(generator: &mut Generator, stmt: &Stmt, indent_level: usize) {
    match stmt {
        Stmt::Binding(binding) => gen_binding(generator, binding, indent_level),
        Stmt::Expression(expression) => {
            let text = gen_expression(generator, &expression.expression);
            generator.emit(indent_level, format!("{};", text));
        }
        Stmt::Return(ret) => match ret.value.as_ref() {
            Some(value) => {
                let text = gen_expression(generator, value);
                generator.emit(indent_level, format!("return {};", text));
            }
            None => generator.emit(indent_level, String::from("return;")),
        },
        Stmt::While(while_stmt) => gen_while(generator, while_stmt, indent_level),
        Stmt::If(if_stmt) => gen_if(generator, if_stmt, indent_level),
        Stmt::FnDecl(fn_decl) => gen_fn_decl(generator, fn_decl, indent_level),
    }
}

/// A multi-name binding becomes one destructuring line so every value is
/// evaluated before any target changes (`a, b = b, a` stays a swap). When a
/// mutable binding mixes fresh declarations with reassignments, the fresh
/// names are hoisted as bare `let` lines and the assignment itself is still
/// a single destructuring statement.
fn gen_binding(generator: &mut Generator, binding: &BindingStmt, indent_level: usize) {
    if binding.targets.len() == 1 {
        let target = &binding.targets[0];
        let name = generator.js_name(target.entity.unwrap());
        let text = gen_expression(generator, &binding.values[0]);

        let line = if !target.is_declaration {
            format!("{} = {};", name, text)
        } else if binding.mutable {
            format!("let {} = {};", name, text)
        } else {
            format!("const {} = {};", name, text)
        };
        generator.emit(indent_level, line);
        return;
    }

    let names = binding
        .targets
        .iter()
        .map(|target| generator.js_name(target.entity.unwrap()))
        .collect::<Vec<String>>();
    let values = binding
        .values
        .iter()
        .map(|value| gen_expression(generator, value))
        .collect::<Vec<String>>();

    let all_declarations = binding.targets.iter().all(|target| target.is_declaration);
    let any_declaration = binding.targets.iter().any(|target| target.is_declaration);

    let line = if all_declarations {
        if binding.mutable {
            format!("let [{}] = [{}];", names.join(", "), values.join(", "))
        } else {
            format!("const [{}] = [{}];", names.join(", "), values.join(", "))
        }
    } else {
        if any_declaration {
            // Mixed targets only occur for mutable bindings
            for (target, name) in binding.targets.iter().zip(names.iter()) {
                if target.is_declaration {
                    generator.emit(indent_level, format!("let {};", name));
                }
            }
        }
        format!("[{}] = [{}];", names.join(", "), values.join(", "))
    };
    generator.emit(indent_level, line);
}

fn gen_while(generator: &mut Generator, while_stmt: &WhileStmt, indent_level: usize) {
    let condition = gen_expression(generator, &while_stmt.condition);
    generator.emit(indent_level, format!("while ({}) {{", condition));
    gen_statement_list(generator, &while_stmt.body.statements, indent_level + 1);
    generator.emit(indent_level, String::from("}"));
}

fn gen_if(generator: &mut Generator, if_stmt: &IfStmt, indent_level: usize) {
    for (index, case) in if_stmt.cases.iter().enumerate() {
        let test = gen_expression(generator, &case.test);
        if index == 0 {
            generator.emit(indent_level, format!("if ({}) {{", test));
        } else {
            generator.emit(indent_level, format!("}} else if ({}) {{", test));
        }
        gen_statement_list(generator, &case.body, indent_level + 1);
    }

    if let Some(alternate) = if_stmt.alternate.as_ref() {
        generator.emit(indent_level, String::from("} else {"));
        gen_statement_list(generator, alternate, indent_level + 1);
    }

    generator.emit(indent_level, String::from("}"));
}

fn gen_fn_decl(generator: &mut Generator, fn_decl: &FnDeclStmt, indent_level: usize) {
    let name = generator.js_name(fn_decl.entity.unwrap());
    let params = fn_decl
        .params
        .iter()
        .map(|param| generator.js_name(param.entity.unwrap()))
        .collect::<Vec<String>>();

    generator.emit(
        indent_level,
        format!("function {}({}) {{", name, params.join(", ")),
    );
    gen_statement_list(generator, &fn_decl.body.statements, indent_level + 1);
    generator.emit(indent_level, String::from("}"));
}
