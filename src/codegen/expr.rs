use crate::ast::expressions::{Expr, TemplateSegment};

use super::codegen::{make_op, Generator};

pub fn gen_expression(generator: &mut Generator, expr: &Expr) -> String {
    match expr {
        Expr::Bool(literal) => literal.value.to_string(),
        Expr::Int(literal) => literal.value.to_string(),
        Expr::Float(literal) => literal.value.to_string(),
        // Debug formatting quotes and escapes the text for us
        Expr::Str(literal) => format!("{:?}", literal.value),
        Expr::None(_) => String::from("null"),
        Expr::Variable(variable) => generator.js_name(variable.referent.unwrap()),
        Expr::Binary(binary) => {
            let left = gen_expression(generator, &binary.left);
            let right = gen_expression(generator, &binary.right);
            format!("({} {} {})", left, make_op(&binary.op), right)
        }
        Expr::Unary(unary) => {
            let operand = gen_expression(generator, &unary.operand);
            format!("({}{})", make_op(&unary.op), operand)
        }
        Expr::Call(call) => {
            let name = generator.js_name(call.referent.unwrap());
            let arguments = call
                .arguments
                .iter()
                .map(|argument| gen_expression(generator, argument))
                .collect::<Vec<String>>();
            format!("{}({})", name, arguments.join(", "))
        }
        Expr::Tuple(tuple) => {
            let values = tuple
                .values
                .iter()
                .map(|value| gen_expression(generator, value))
                .collect::<Vec<String>>();
            format!("[{}]", values.join(", "))
        }
        Expr::Matrix(matrix) => {
            let values = matrix
                .values
                .iter()
                .map(|value| gen_expression(generator, value))
                .collect::<Vec<String>>();
            format!("[{}]", values.join(", "))
        }
        Expr::Set(set) => {
            let values = set
                .values
                .iter()
                .map(|value| gen_expression(generator, value))
                .collect::<Vec<String>>();
            format!("new Set([{}])", values.join(", "))
        }
        // Computed keys, so an expression key is evaluated rather than
        // read as a literal property name
        Expr::Dictionary(dictionary) => {
            let pairs = dictionary
                .pairs
                .iter()
                .map(|pair| {
                    let key = gen_expression(generator, &pair.key);
                    let value = gen_expression(generator, &pair.value);
                    format!("[{}]: {}", key, value)
                })
                .collect::<Vec<String>>();
            format!("{{{}}}", pairs.join(", "))
        }
        Expr::Template(template) => {
            let mut text = String::from("`");
            for segment in template.segments.iter() {
                match segment {
                    TemplateSegment::Text(raw) => text.push_str(raw),
                    TemplateSegment::Interpolation(value) => {
                        text.push_str("${");
                        text.push_str(&gen_expression(generator, value));
                        text.push('}');
                    }
                }
            }
            text.push('`');
            text
        }
    }
}
