use crate::runtime::error::RuntimeError;
use miette::Report;

pub fn render_runtime_error(error: &RuntimeError) -> String {
    format!("{:?}", Report::new(error.clone()))
}

pub fn report_runtime_error(error: &RuntimeError) {
    eprintln!("{}", render_runtime_error(error));
}
