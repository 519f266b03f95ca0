//! Built-in demo commands.

use switchboard_core::prelude::*;
use switchboard_core::Catalog;

/// Scope under which the built-in commands are registered.
pub const BUILTIN_SCOPE: &str = "builtin";

/// Upper bound for `repeat --times`.
pub const MAX_REPEAT: i32 = 10_000;

/// Upper bound for the size of `repeat` output, in bytes.
pub const MAX_REPEAT_BYTES: usize = 16 * 1024 * 1024;

pub fn catalog() -> Catalog {
    Catalog::new()
        .register::<HelloWorld>(BUILTIN_SCOPE)
        .register::<Goodbye>(BUILTIN_SCOPE)
        .register::<Repeat>(BUILTIN_SCOPE)
}

#[derive(Default)]
pub struct HelloWorld {
    name: String,
    formal: bool,
}

impl Command for HelloWorld {
    fn schema() -> Schema<Self> {
        Schema::new("hello")
            .description("Prints hello world")
            .parameter(
                Param::new("name").short("n").description("The name to print").required(),
                |c: &mut Self, v: String| c.name = v,
            )
            .flag(
                Flag::new("formal").short("f").description("Use formal greeting"),
                |c, v| c.formal = v,
            )
    }

    fn run(&mut self) -> CommandOutput {
        if self.formal {
            return CommandOutput::success(format!("Good Morning, {}", self.name));
        }
        CommandOutput::success(format!("Hello {}!", self.name))
    }
}

#[derive(Default)]
pub struct Goodbye;

impl Command for Goodbye {
    fn schema() -> Schema<Self> {
        Schema::new("goodbye").short_name("bye").description("Prints goodbye world")
    }

    fn run(&mut self) -> CommandOutput {
        CommandOutput::success("Goodbye!")
    }
}

#[derive(Default)]
pub struct Repeat {
    text: String,
    times: i32,
    separator: String,
    upper: bool,
}

impl Command for Repeat {
    fn schema() -> Schema<Self> {
        Schema::new("repeat")
            .short_name("r")
            .description("Repeats a piece of text")
            .parameter(
                Param::new("text").short("t").description("Text to repeat").required(),
                |c: &mut Self, v: String| c.text = v,
            )
            .parameter(
                Param::new("times")
                    .short("n")
                    .description("How many copies")
                    .default_value("2"),
                |c: &mut Self, v: i32| c.times = v,
            )
            .parameter(
                Param::new("separator")
                    .short("s")
                    .description("Joins the copies")
                    .default_value(" "),
                |c: &mut Self, v: String| c.separator = v,
            )
            .flag(
                Flag::new("upper").short("u").description("Uppercase the result"),
                |c, v| c.upper = v,
            )
    }

    fn run(&mut self) -> CommandOutput {
        if self.times > MAX_REPEAT {
            return CommandOutput::failure(format!(
                "times must be at most {}, got {}",
                MAX_REPEAT, self.times
            ));
        }

        let text = if self.upper {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        };

        let times = self.times.max(0) as usize;
        let size = (text.len() + self.separator.len()).saturating_mul(times);
        if size > MAX_REPEAT_BYTES {
            return CommandOutput::failure(format!(
                "output would be {} bytes, limit is {}",
                size, MAX_REPEAT_BYTES
            ));
        }

        let copies = vec![text; times];
        CommandOutput::success(copies.join(&self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::{Discovery, Dispatch};

    fn run(values: &[&str]) -> Dispatch {
        let app = Application::builder()
            .discover(&catalog(), BUILTIN_SCOPE)
            .unwrap()
            .build();
        let args: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        app.run(&args, &mut std::io::sink()).unwrap()
    }

    #[test]
    fn catalog_holds_all_builtins() {
        assert_eq!(catalog().discover(BUILTIN_SCOPE).unwrap().len(), 3);
    }

    #[test]
    fn repeat_defaults() {
        assert_eq!(
            run(&["repeat", "--text", "ab"]),
            Dispatch::Completed(CommandOutput::success("ab ab"))
        );
    }

    #[test]
    fn repeat_with_options() {
        assert_eq!(
            run(&["r", "-t", "go", "-n", "3", "-s", ",", "-u"]),
            Dispatch::Completed(CommandOutput::success("GO,GO,GO"))
        );
    }

    #[test]
    fn repeat_caps_count() {
        match run(&["repeat", "-t", "a", "-n", "2000000000"]) {
            Dispatch::Completed(output) => {
                assert!(!output.success);
                assert_eq!(output.output, "times must be at most 10000, got 2000000000");
            }
            other => panic!("expected completed dispatch, got {other:?}"),
        }

        let at_cap = MAX_REPEAT.to_string();
        match run(&["repeat", "-t", "a", "-n", at_cap.as_str()]) {
            Dispatch::Completed(output) => {
                assert!(output.success);
                assert_eq!(output.output.len(), 2 * MAX_REPEAT as usize - 1);
            }
            other => panic!("expected completed dispatch, got {other:?}"),
        }
    }

    #[test]
    fn repeat_caps_output_size() {
        let text = "x".repeat(4096);
        match run(&["repeat", "-t", text.as_str(), "-n", "10000", "-s", ","]) {
            Dispatch::Completed(output) => {
                assert!(!output.success);
                assert!(output.output.starts_with("output would be 40970000 bytes"));
            }
            other => panic!("expected completed dispatch, got {other:?}"),
        }
    }

    #[test]
    fn repeat_rejects_non_numeric_count() {
        match run(&["repeat", "-t", "x", "-n", "minus"]) {
            Dispatch::Completed(output) => {
                assert!(!output.success);
                assert_eq!(output.output, "Invalid value for times: minus");
            }
            other => panic!("expected completed dispatch, got {other:?}"),
        }
    }
}
