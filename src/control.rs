//! Name-keyed runtime parameter control.
//!
//! Graphs are assembled and reconfigured through `Rc<RefCell<dyn Generator>>`
//! / `Rc<RefCell<dyn Modifier>>` handles, so the code holding a handle has no
//! concrete type to set parameters on. Every unit therefore carries a method
//! table: a per-instance registry mapping a method name to a function over a
//! tagged argument bundle.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/*
Calling a Method by Name
========================

A caller that only holds a type-erased handle tunes a unit like this:

  let osc = generators::triangle(440.0, 48_000);
  osc.borrow_mut().call_method("SetFrequency", &mut [Value::Float(880.0)])?;

Methods that produce a value have no return channel other than the bundle
itself: the caller provides a slot and the method overwrites it.

  let mut slots = [Value::Float(0.0)];
  osc.borrow_mut().call_method("GetFrequency", &mut slots)?;

Each slot is a closed tagged variant rather than an opaque pointer, so a
bundle that does not match the method's signature is a recoverable
`MethodError`, not undefined behavior. An unregistered name is always a hard
`NotFound` error; it is never silently ignored.
*/

/// One slot in a method-call argument bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
}

/// Why a dispatched call could not run.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodError {
    /// No method is registered under the requested name.
    NotFound(String),
    /// The bundle has fewer slots than the method's signature expects.
    MissingArg { index: usize },
    /// A slot holds a different variant than the method's signature expects.
    TypeMismatch {
        index: usize,
        expected: &'static str,
    },
}

impl fmt::Display for MethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodError::NotFound(name) => write!(f, "no method registered under {name:?}"),
            MethodError::MissingArg { index } => {
                write!(f, "argument bundle has no slot {index}")
            }
            MethodError::TypeMismatch { index, expected } => {
                write!(f, "argument slot {index} is not a {expected}")
            }
        }
    }
}

impl Error for MethodError {}

/// Argument bundle handed to a dispatched method.
pub struct Args<'a> {
    slots: &'a mut [Value],
}

impl<'a> Args<'a> {
    pub fn new(slots: &'a mut [Value]) -> Self {
        Self { slots }
    }

    /// Reads slot `index` as a float.
    pub fn float(&self, index: usize) -> Result<f64, MethodError> {
        match self.slots.get(index) {
            Some(Value::Float(value)) => Ok(*value),
            Some(_) => Err(MethodError::TypeMismatch {
                index,
                expected: "float",
            }),
            None => Err(MethodError::MissingArg { index }),
        }
    }

    /// Reads slot `index` as an integer.
    pub fn int(&self, index: usize) -> Result<i64, MethodError> {
        match self.slots.get(index) {
            Some(Value::Int(value)) => Ok(*value),
            Some(_) => Err(MethodError::TypeMismatch {
                index,
                expected: "int",
            }),
            None => Err(MethodError::MissingArg { index }),
        }
    }

    /// Overwrites slot `index`, the bundle's only return channel.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), MethodError> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MethodError::MissingArg { index }),
        }
    }
}

/// A dispatched method: borrows the receiver and its argument bundle.
pub type Method<T> = fn(&mut T, &mut Args) -> Result<(), MethodError>;

/// Per-instance registry mapping method names to methods.
pub struct MethodTable<T> {
    methods: HashMap<&'static str, Method<T>>,
}

impl<T> MethodTable<T> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Registers `method` under `name`. Registering the same name twice
    /// replaces the earlier method.
    pub fn register(&mut self, name: &'static str, method: Method<T>) {
        self.methods.insert(name, method);
    }

    /// Looks up the method registered under `name`.
    pub fn get(&self, name: &str) -> Result<Method<T>, MethodError> {
        self.methods
            .get(name)
            .copied()
            .ok_or_else(|| MethodError::NotFound(name.to_owned()))
    }
}

impl<T> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime parameter control over a type-erased unit.
///
/// Besides construction, this is the only sanctioned mutation path for a
/// graph unit's parameters.
pub trait Controlled {
    /// Invokes the method registered under `name` with `slots` as its
    /// argument bundle.
    fn call_method(&mut self, name: &str, slots: &mut [Value]) -> Result<(), MethodError>;
}

/// Wires a concrete unit's method table into [`Controlled`].
///
/// Units register their methods in their constructor and implement only this
/// trait; the dispatch plumbing is shared.
pub trait HasMethods: Sized {
    fn method_table(&self) -> &MethodTable<Self>;
}

impl<T: HasMethods> Controlled for T {
    fn call_method(&mut self, name: &str, slots: &mut [Value]) -> Result<(), MethodError> {
        let method = self.method_table().get(name)?;
        let mut args = Args::new(slots);
        method(self, &mut args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dial {
        value: f64,
        methods: MethodTable<Self>,
    }

    impl Dial {
        fn new() -> Self {
            let mut methods = MethodTable::new();
            methods.register("SetValue", |dial: &mut Self, args: &mut Args| {
                dial.value = args.float(0)?;
                Ok(())
            });
            methods.register("GetValue", |dial: &mut Self, args: &mut Args| {
                args.set(0, Value::Float(dial.value))
            });
            Self {
                value: 0.0,
                methods,
            }
        }
    }

    impl HasMethods for Dial {
        fn method_table(&self) -> &MethodTable<Self> {
            &self.methods
        }
    }

    #[test]
    fn set_then_get_round_trips_through_the_bundle() {
        let mut dial = Dial::new();
        dial.call_method("SetValue", &mut [Value::Float(3.5)])
            .unwrap();

        let mut slots = [Value::Float(0.0)];
        dial.call_method("GetValue", &mut slots).unwrap();
        assert_eq!(slots[0], Value::Float(3.5));
    }

    #[test]
    fn unknown_name_is_a_lookup_error() {
        let mut dial = Dial::new();
        let err = dial.call_method("SetVolume", &mut []).unwrap_err();
        assert_eq!(err, MethodError::NotFound("SetVolume".to_owned()));
    }

    #[test]
    fn wrong_variant_is_a_type_mismatch() {
        let mut dial = Dial::new();
        let err = dial
            .call_method("SetValue", &mut [Value::Int(3)])
            .unwrap_err();
        assert_eq!(
            err,
            MethodError::TypeMismatch {
                index: 0,
                expected: "float"
            }
        );
    }

    #[test]
    fn short_bundle_is_a_missing_arg() {
        let mut dial = Dial::new();
        let err = dial.call_method("SetValue", &mut []).unwrap_err();
        assert_eq!(err, MethodError::MissingArg { index: 0 });
    }

    #[test]
    fn duplicate_registration_overwrites() {
        let mut dial = Dial::new();
        dial.methods
            .register("SetValue", |dial: &mut Dial, _args: &mut Args| {
                dial.value = -1.0;
                Ok(())
            });

        dial.call_method("SetValue", &mut [Value::Float(3.5)])
            .unwrap();
        assert_eq!(dial.value, -1.0);
    }
}
