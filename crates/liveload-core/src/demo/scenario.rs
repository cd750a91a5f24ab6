use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::builtins::COUNTER_MODULE;
use super::Transcript;
use crate::module::{ImportStyle, ModuleRegistry, Result};
use crate::property::{legacy, reflect, PlainObject, PropertyDescriptor};
use crate::proxy::{Proxy, ProxyHandler};
use crate::value::Value;

/// A runnable demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    LiveBinding,
    DefineProperty,
    LoadOrder,
    ProxyGet,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::LiveBinding,
        Scenario::DefineProperty,
        Scenario::LoadOrder,
        Scenario::ProxyGet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::LiveBinding => "live-binding",
            Scenario::DefineProperty => "define-property",
            Scenario::LoadOrder => "load-order",
            Scenario::ProxyGet => "proxy-get",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Scenario::ALL.iter().map(Scenario::name).collect();
                format!("unknown scenario '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Import `counter` and `incCounter` by name, keep the namespace as `lib`,
/// and print `counter` / `lib.counter` around two increments
pub fn live_binding(
    registry: &ModuleRegistry,
    style: ImportStyle,
    out: &Transcript,
) -> Result<()> {
    let imported = registry.import(COUNTER_MODULE, style)?;
    let counter = imported.binding("counter")?;
    let inc_counter = imported.binding("incCounter")?;
    let lib = registry.resolve(COUNTER_MODULE)?;
    debug!("live-binding: counter bound as {:?}", counter);

    out.push(counter.value()?.to_string());
    inc_counter.call(&[])?;
    out.push(counter.value()?.to_string());

    out.push(lib.get_export("counter")?.get().to_string());
    inc_counter.call(&[])?;
    out.push(lib.get_export("counter")?.get().to_string());
    Ok(())
}

/// Try to give a non-configurable property a value, first through the
/// throwing API (when `legacy` is set), then through the boolean one
pub fn define_property(legacy_define: bool, out: &Transcript) {
    let mut target = PlainObject::new();
    let defined = reflect::define_property(
        &mut target,
        "getDate",
        PropertyDescriptor::new().configurable(false),
    );
    debug_assert!(defined, "fresh extensible object rejected getDate");

    if legacy_define {
        match legacy::define_property(&mut target, "getDate", PropertyDescriptor::new().value(11))
        {
            Ok(()) => debug!("legacy defineProperty succeeded"),
            Err(e) => out.push(format!("error: {}", e)),
        }
    }

    if reflect::define_property(&mut target, "getDate", PropertyDescriptor::new().value(11)) {
        debug!("Reflect.defineProperty succeeded");
    } else {
        out.push("failure");
    }
}

/// Load two announcing modules, then load the first again
pub fn load_order(registry: &ModuleRegistry, out: &Transcript) -> Result<()> {
    out.push("Before require module1");
    let module1 = registry.resolve("./1")?;
    out.push("After require module1");

    out.push("Before require module2");
    let module2 = registry.resolve("./2")?;
    out.push("After require module2");

    out.push(format!("Module 1 content: {}", module1));
    out.push(format!("Module 2 content: {}", module2));

    out.push("Before require module1 again");
    let again = registry.resolve("./1.js")?;
    out.push("After require module1 again");
    out.push(format!("Same module1 record: {}", Arc::ptr_eq(&module1, &again)));
    Ok(())
}

/// Serves `getDate` from the target's ISO `date` string
struct DateHandler;

impl ProxyHandler for DateHandler {
    fn get(&self, target: &PlainObject, key: &str) -> Value {
        if key != "getDate" {
            return reflect::get(target, key);
        }
        reflect::get(target, "date")
            .as_str()
            .and_then(|iso| iso.rsplit('-').next())
            .and_then(|day| day.parse::<f64>().ok())
            .map(Value::Number)
            .unwrap_or(Value::Number(f64::NAN))
    }
}

/// Read `getDate` through a proxy whose `get` trap computes it
pub fn proxy_get(out: &Transcript) {
    let mut target = PlainObject::new();
    let defined =
        reflect::define_property(&mut target, "date", PropertyDescriptor::data("2015-01-02"));
    debug_assert!(defined, "fresh extensible object rejected date");
    let proxy = Proxy::new(target, DateHandler);

    out.push(proxy.get("getDate").to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenarios() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        let err = "nope".parse::<Scenario>().unwrap_err();
        assert!(err.contains("live-binding"));
    }

    #[test]
    fn test_define_property_reflect_only() {
        let out = Transcript::new();
        define_property(false, &out);
        assert_eq!(out.take(), vec!["failure"]);
    }

    #[test]
    fn test_define_property_with_legacy() {
        let out = Transcript::new();
        define_property(true, &out);
        assert_eq!(
            out.take(),
            vec![
                "error: TypeError: Cannot redefine property: getDate",
                "failure"
            ]
        );
    }

    #[test]
    fn test_proxy_get() {
        let out = Transcript::new();
        proxy_get(&out);
        assert_eq!(out.take(), vec!["2"]);
    }
}
