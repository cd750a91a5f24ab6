use super::Transcript;
use crate::module::{InitError, LoadError, ModuleBuilder, ModuleSources};
use crate::value::Value;

/// Specifier of the counter module
pub const COUNTER_MODULE: &str = "./index.js";

/// Initial value of the counter module's `counter` export
pub const COUNTER_START: i32 = 3;

/// `counter` starts at 3; `incCounter()` increments the module's own cell
fn counter_module(module: &mut ModuleBuilder) -> Result<(), InitError> {
    let counter = module.cell(COUNTER_START);
    module.export_value("counter", &counter)?;

    let cell = counter.clone();
    module.export_fn("incCounter", move |_| {
        cell.update(|v| {
            let n = v.as_number().unwrap_or(0.0);
            *v = Value::from(n + 1.0);
        });
        Value::Undefined
    })
}

/// A module whose body announces itself on the transcript and exports its name
fn announcing_module(
    transcript: Transcript,
    index: u32,
) -> impl Fn(&mut ModuleBuilder) -> Result<(), InitError> + Send + Sync {
    move |module: &mut ModuleBuilder| {
        transcript.push(format!("Module {} body executed", index));
        let name = module.cell(format!("module{}", index));
        module.export_value("name", &name)
    }
}

/// Sources backing the built-in scenarios
pub fn builtin_sources(transcript: &Transcript) -> Result<ModuleSources, LoadError> {
    let mut sources = ModuleSources::new();
    sources.register(COUNTER_MODULE, counter_module)?;
    sources.register("./1.js", announcing_module(transcript.clone(), 1))?;
    sources.register("./2.js", announcing_module(transcript.clone(), 2))?;
    Ok(sources)
}
