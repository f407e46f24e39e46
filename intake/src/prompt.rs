//! Line-oriented terminal form. Generic over the reader and writer so it can be
//! driven from tests.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use common::form::{CustomerForm, Feedback};
use common::utils::ContactMethod;

/// Typed alone, clears the field instead of keeping its current value.
const CLEAR_MARKER: &str = "-";

/// Shows `label [current]: ` and reads one line. Returns `None` at end of input.
pub fn read_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
) -> io::Result<Option<String>> {
    if current.is_empty() {
        write!(output, "{}: ", label)?;
    } else {
        write!(output, "{} [{}]: ", label, current)?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let entered = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let value = match entered {
        "" => current.to_string(),
        CLEAR_MARKER => String::new(),
        text => text.to_string(),
    };
    Ok(Some(value))
}

/// Prompts for every input in form order. Returns `false` if input ran out.
pub fn fill<R: BufRead, W: Write>(
    form: &mut CustomerForm,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let inputs = &mut form.inputs;
    let text_fields = [
        ("Name", &mut inputs.name),
        ("Birthday (YYYY-MM-DD)", &mut inputs.birthday),
        ("Email", &mut inputs.email),
        ("Phone Number", &mut inputs.phone),
        ("Address", &mut inputs.address),
    ];

    for (label, field) in text_fields {
        match read_field(input, output, label, field.as_str())? {
            Some(value) => *field = value,
            None => return Ok(false),
        }
    }

    let choices: Vec<String> = ContactMethod::ALL.iter().map(|m| m.to_string()).collect();
    let label = format!("Contact Method ({})", choices.join("/"));

    loop {
        let current = form.inputs.contact_method.to_string();
        let Some(answer) = read_field(input, output, &label, &current)? else {
            return Ok(false);
        };

        match answer.parse::<ContactMethod>() {
            Ok(method) => {
                form.inputs.contact_method = method;
                return Ok(true);
            }
            Err(err) => writeln!(output, "{}", err)?,
        }
    }
}

/// Yes unless the answer is `n`/`no`; end of input counts as no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{} [Y/n]: ", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(!matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "n" | "no"
    ))
}

pub fn render(feedback: &Feedback) -> String {
    let title = if feedback.is_success() {
        feedback.title().green().bold()
    } else {
        feedback.title().red().bold()
    };
    format!("{}: {}", title, feedback.message)
}
