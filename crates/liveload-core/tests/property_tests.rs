//! Property-based tests for the module cache and property definition
//!
//! These use proptest to check the cache and descriptor invariants across
//! random specifiers, mutation counts and descriptors.

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use liveload_core::demo::{builtin_sources, COUNTER_MODULE, COUNTER_START};
use liveload_core::property::{legacy, reflect};
use liveload_core::{
    ImportStyle, InitError, ModuleBuilder, ModuleRegistry, ModuleSources, PlainObject,
    PropertyDescriptor, Transcript, Value,
};

/// Strategy for generating module specifiers
fn specifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}(/[a-z][a-z0-9_]{0,8})?\\.(js|mjs|cjs)"
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Boolean),
        (-1000i32..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn descriptor_strategy() -> impl Strategy<Value = PropertyDescriptor> {
    (
        proptest::option::of(value_strategy()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(value, writable, enumerable, configurable)| PropertyDescriptor {
            value,
            writable,
            enumerable,
            configurable,
        })
}

proptest! {
    #[test]
    fn resolve_initializes_each_specifier_once(
        specs in proptest::collection::btree_set(specifier_strategy(), 1..6),
        repeats in 1usize..5,
    ) {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut sources = ModuleSources::new();
        for spec in &specs {
            let runs = runs.clone();
            sources
                .register(spec, move |_: &mut ModuleBuilder| -> Result<(), InitError> {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
        }
        let registry = ModuleRegistry::new(sources);

        for _ in 0..repeats {
            for spec in &specs {
                let first = registry.resolve(spec).unwrap();
                let again = registry.resolve(&format!("./{}", spec)).unwrap();
                prop_assert!(Arc::ptr_eq(&first, &again));
            }
        }

        prop_assert_eq!(runs.load(Ordering::SeqCst), specs.len());
        prop_assert_eq!(registry.len(), specs.len());
    }

    #[test]
    fn copies_stay_put_while_live_reads_advance(increments in 0usize..40) {
        let registry = ModuleRegistry::new(builtin_sources(&Transcript::new()).unwrap());
        let required = registry.import(COUNTER_MODULE, ImportStyle::Require).unwrap();
        let imported = registry.import(COUNTER_MODULE, ImportStyle::Import).unwrap();
        let copied = required.binding("counter").unwrap();
        let live = imported.binding("counter").unwrap();

        for _ in 0..increments {
            registry.resolve(COUNTER_MODULE).unwrap().call("incCounter", &[]).unwrap();
        }

        let expected = Value::from(COUNTER_START + increments as i32);
        prop_assert_eq!(copied.value().unwrap(), Value::from(COUNTER_START));
        prop_assert_eq!(live.value().unwrap(), expected.clone());
        prop_assert_eq!(
            registry.resolve(COUNTER_MODULE).unwrap().copy_export("counter").unwrap(),
            expected
        );
    }

    #[test]
    fn failed_definitions_leave_target_unchanged(
        initial in descriptor_strategy(),
        update in descriptor_strategy(),
    ) {
        let mut target = PlainObject::new();
        reflect::define_property(&mut target, "key", initial);
        let before = target.clone();

        let mut reflected = target.clone();
        let ok = reflect::define_property(&mut reflected, "key", update.clone());

        let mut thrown = target.clone();
        let result = legacy::define_property(&mut thrown, "key", update);

        // Both contracts agree on the outcome
        prop_assert_eq!(ok, result.is_ok());
        prop_assert_eq!(&reflected, &thrown);
        if !ok {
            prop_assert_eq!(&reflected, &before);
        }
    }

    #[test]
    fn non_configurable_never_becomes_configurable(update in descriptor_strategy()) {
        let mut target = PlainObject::new();
        reflect::define_property(
            &mut target,
            "getDate",
            PropertyDescriptor::new().configurable(false),
        );

        reflect::define_property(&mut target, "getDate", update);

        let prop = target.get_own_property("getDate").unwrap();
        prop_assert!(!prop.configurable);
        prop_assert!(!prop.writable);
        prop_assert_eq!(&prop.value, &Value::Undefined);
    }
}
