//! Timed call wrapper that logs entry and completion lines.

use std::any::Any;
use std::fmt::{self, Debug};
use std::rc::Rc;
use std::time::Instant;

use crossterm::style::Stylize;

use super::origin::{CallOrigin, CallStack};

/// Calls finishing within this many seconds (after rounding to two decimals)
/// get no completion line.
pub const MIN_REPORTED_SECS: f64 = 0.0009;

/// Where trace lines go.
#[derive(Clone, Default)]
pub enum Sink {
    #[default]
    Stdout,
    /// `log::info!` under the `vto::trace` target.
    Log,
    Custom(Rc<dyn Fn(&str)>),
}

impl Sink {
    pub fn custom(f: impl Fn(&str) + 'static) -> Self {
        Sink::Custom(Rc::new(f))
    }

    fn emit(&self, line: &str) {
        match self {
            Sink::Stdout => println!("{}", line),
            Sink::Log => log::info!(target: "vto::trace", "{}", line),
            Sink::Custom(f) => f(line),
        }
    }
}

impl Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Log => f.write_str("Log"),
            Sink::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Configuration for timing and labelling calls.
///
/// ```
/// use vto::trace::{CallOrigin, Tracer};
///
/// let double = Tracer::new()
///     .origin(CallOrigin::here("double"))
///     .wrap("double", |x: u32| x * 2);
/// assert_eq!(double(21), 42);
/// ```
#[derive(Debug, Clone)]
pub struct Tracer {
    enabled: bool,
    hint: String,
    print_args: bool,
    print_return: bool,
    origin: Option<CallOrigin>,
    stack: Option<(CallStack, String)>,
    sink: Sink,
}

impl Default for Tracer {
    fn default() -> Self {
        Self {
            enabled: true,
            hint: "cost".to_string(),
            print_args: false,
            print_return: false,
            origin: None,
            stack: None,
            sink: Sink::Stdout,
        }
    }
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// When disabled, calls go straight through without any output.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Word printed before the elapsed time.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn print_args(mut self, print: bool) -> Self {
        self.print_args = print;
        self
    }

    pub fn print_return(mut self, print: bool) -> Self {
        self.print_return = print;
        self
    }

    /// Origin used when no stack frame matches.
    pub fn origin(mut self, origin: CallOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Label calls with the outermost frame of `stack` whose source contains
    /// `prefix`. An empty prefix disables the scan.
    pub fn scan(mut self, stack: &CallStack, prefix: impl Into<String>) -> Self {
        self.stack = Some((stack.clone(), prefix.into()));
        self
    }

    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    /// Label for a call to `name`: stack scan first, then the configured
    /// origin, then the bare name.
    pub fn label(&self, name: &str) -> String {
        let scanned = match &self.stack {
            Some((stack, prefix)) if !prefix.is_empty() => stack.scan(prefix),
            _ => None,
        };
        match scanned.as_ref().or(self.origin.as_ref()) {
            Some(origin) => origin.label(),
            None => name.to_string(),
        }
    }

    /// Run `f(args)` once, logging around it.
    pub fn call<A, R, F>(&self, name: &str, args: A, f: F) -> R
    where
        A: Debug,
        R: Debug + 'static,
        F: FnOnce(A) -> R,
    {
        if !self.enabled {
            return f(args);
        }

        let started = Instant::now();
        let label = self.label(name);
        let mut extra = if self.print_args {
            format!("*{:?}", args)
        } else {
            String::new()
        };

        self.sink
            .emit(&format!("{} {} entered", "↘".bold().cyan(), label));

        let result = f(args);

        let cost = round_secs(started.elapsed().as_secs_f64());
        if cost > MIN_REPORTED_SECS {
            if self.print_return {
                if let Some(value) = describe_return(&result) {
                    if !extra.is_empty() {
                        extra.push(' ');
                    }
                    extra.push_str(&value);
                }
            }
            let extra = if extra.is_empty() {
                " ".to_string()
            } else {
                format!(" {} ", extra)
            };
            self.sink.emit(&format!(
                "{}{}{}{} {}s",
                "✔ ".bold().blue(),
                label,
                extra,
                self.hint,
                cost.to_string().bold().blue()
            ));
        }

        result
    }

    /// Wrap `f` so every call is traced under `name`. Several arguments are
    /// passed as a tuple.
    pub fn wrap<A, R, F>(self, name: impl Into<String>, f: F) -> impl Fn(A) -> R
    where
        A: Debug,
        R: Debug + 'static,
        F: Fn(A) -> R,
    {
        let name = name.into();
        move |args: A| self.call(&name, args, &f)
    }
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// `None` for `()`, otherwise the `Debug` rendering.
fn describe_return<R: Debug + 'static>(value: &R) -> Option<String> {
    if (value as &dyn Any).is::<()>() {
        None
    } else {
        Some(format!("{:?}", value))
    }
}
