//! Command interface and declarative field schemas.
//!
//! A command type describes itself with a [`Schema`]: its name, aliases and
//! one typed setter per field. The engine never inspects the type itself; it
//! reads the schema's [`CommandDescriptor`] and writes values through the
//! registered setters.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::descriptor::{CommandDescriptor, FieldDescriptor, FieldKind, FieldValue, ValueType};
use crate::error::BindError;

/// Uniform result envelope returned by every command run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub success: bool,
    pub output: String,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Core trait for all user commands.
pub trait Command: Sized + 'static {
    /// Describe the command and how its fields are written.
    fn schema() -> Schema<Self>;

    /// Execute the command after its fields have been bound.
    fn run(&mut self) -> CommandOutput;
}

/// A freshly created command instance, as seen by the binder and dispatcher.
pub trait Instance {
    /// Write a coerced value into the named field
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), BindError>;

    fn run(&mut self) -> CommandOutput;
}

/// Rust types a field setter may accept.
pub trait FieldType: Sized {
    const VALUE_TYPE: ValueType;

    fn from_value(value: FieldValue) -> Option<Self>;
}

macro_rules! field_type {
    ($ty:ty, $variant:ident, $value_type:ident) => {
        impl FieldType for $ty {
            const VALUE_TYPE: ValueType = ValueType::$value_type;

            fn from_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

field_type!(String, Str, String);
field_type!(i32, Int, Int);
field_type!(i64, Long, Long);
field_type!(f32, Float, Float);
field_type!(f64, Double, Double);
field_type!(bool, Bool, Bool);

/// Declaration of a valued parameter.
#[derive(Debug, Clone, Default)]
pub struct Param {
    name: String,
    short_name: Option<String>,
    description: String,
    required: bool,
    default: String,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short_name: &str) -> Self {
        self.short_name = Some(short_name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    fn into_descriptor(self, value_type: ValueType) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            short_name: self.short_name,
            description: self.description,
            value_type,
            kind: FieldKind::Parameter {
                required: self.required,
                default: self.default,
            },
        }
    }
}

/// Declaration of a boolean flag.
#[derive(Debug, Clone, Default)]
pub struct Flag {
    name: String,
    short_name: Option<String>,
    description: String,
    default: bool,
}

impl Flag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short_name: &str) -> Self {
        self.short_name = Some(short_name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn default_value(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    fn into_descriptor(self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            short_name: self.short_name,
            description: self.description,
            value_type: ValueType::Bool,
            kind: FieldKind::Flag {
                default: self.default,
            },
        }
    }
}

type Setter<C> = Box<dyn Fn(&mut C, FieldValue) -> Option<()> + Send + Sync>;

/// Descriptor plus field accessors for a command type `C`.
pub struct Schema<C> {
    descriptor: CommandDescriptor,
    setters: HashMap<String, Setter<C>>,
}

impl<C: 'static> Schema<C> {
    pub fn new(name: &str) -> Self {
        Self {
            descriptor: CommandDescriptor::new(name),
            setters: HashMap::new(),
        }
    }

    pub fn short_name(mut self, short_name: &str) -> Self {
        self.descriptor.short_name = Some(short_name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.descriptor.description = description.to_string();
        self
    }

    /// Declare a parameter; its type is taken from the setter's argument
    pub fn parameter<T, F>(self, param: Param, set: F) -> Self
    where
        T: FieldType + 'static,
        F: Fn(&mut C, T) + Send + Sync + 'static,
    {
        let field = param.into_descriptor(T::VALUE_TYPE);
        self.field(field, set)
    }

    pub fn flag<F>(self, flag: Flag, set: F) -> Self
    where
        F: Fn(&mut C, bool) + Send + Sync + 'static,
    {
        let field = flag.into_descriptor();
        self.field::<bool, F>(field, set)
    }

    fn field<T, F>(mut self, field: FieldDescriptor, set: F) -> Self
    where
        T: FieldType + 'static,
        F: Fn(&mut C, T) + Send + Sync + 'static,
    {
        let setter: Setter<C> = Box::new(move |target, value| {
            let value = T::from_value(value)?;
            set(target, value);
            Some(())
        });

        // Redeclaring a field drops the earlier declaration
        self.descriptor.fields.retain(|f| f.name != field.name);
        self.setters.insert(field.name.clone(), setter);
        self.descriptor.fields.push(field);
        self
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Write `value` into `target` through the named field's setter
    pub fn assign(&self, target: &mut C, field: &str, value: FieldValue) -> Result<(), BindError> {
        let setter = self
            .setters
            .get(field)
            .ok_or_else(|| BindError::UnknownField(field.to_string()))?;

        setter(target, value).ok_or_else(|| BindError::UnsupportedFieldType(field.to_string()))
    }
}

/// A command value paired with the schema that knows how to fill it.
pub struct Bound<C> {
    command: C,
    schema: Arc<Schema<C>>,
}

impl<C: Command> Bound<C> {
    pub fn new(command: C, schema: Arc<Schema<C>>) -> Self {
        Self { command, schema }
    }

    pub fn into_inner(self) -> C {
        self.command
    }
}

impl<C: Command> Instance for Bound<C> {
    fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), BindError> {
        self.schema.assign(&mut self.command, field, value)
    }

    fn run(&mut self) -> CommandOutput {
        self.command.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Greet {
        name: String,
        times: i32,
        loud: bool,
    }

    impl Command for Greet {
        fn schema() -> Schema<Self> {
            Schema::new("greet")
                .short_name("g")
                .description("Greets someone")
                .parameter(Param::new("name").short("n").required(), |c: &mut Self, v: String| {
                    c.name = v
                })
                .parameter(Param::new("times").default_value("1"), |c: &mut Self, v: i32| {
                    c.times = v
                })
                .flag(Flag::new("loud").short("l"), |c, v| c.loud = v)
        }

        fn run(&mut self) -> CommandOutput {
            let mut line = format!("hi {}", self.name).repeat(self.times as usize);
            if self.loud {
                line = line.to_uppercase();
            }
            CommandOutput::success(line)
        }
    }

    #[test]
    fn schema_builds_descriptor_in_declaration_order() {
        let schema = Greet::schema();
        let descriptor = schema.descriptor();

        assert_eq!(descriptor.name, "greet");
        assert_eq!(descriptor.short(), Some("g"));
        let names: Vec<_> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "times", "loud"]);

        assert_eq!(descriptor.fields[0].value_type, ValueType::String);
        assert!(descriptor.fields[0].is_required());
        assert_eq!(descriptor.fields[1].value_type, ValueType::Int);
        assert_eq!(descriptor.fields[2].value_type, ValueType::Bool);
        assert!(descriptor.fields[2].is_flag());
    }

    #[test]
    fn assign_goes_through_setter() {
        let schema = Arc::new(Greet::schema());
        let mut bound = Bound::new(Greet::default(), schema);

        bound.assign("name", FieldValue::Str("bob".into())).unwrap();
        bound.assign("times", FieldValue::Int(2)).unwrap();
        bound.assign("loud", FieldValue::Bool(true)).unwrap();

        assert_eq!(bound.run(), CommandOutput::success("HI BOBHI BOB"));
    }

    #[test]
    fn assign_rejects_unknown_field_and_wrong_variant() {
        let schema = Greet::schema();
        let mut greet = Greet::default();

        assert_eq!(
            schema.assign(&mut greet, "nope", FieldValue::Bool(true)),
            Err(BindError::UnknownField("nope".into()))
        );
        assert_eq!(
            schema.assign(&mut greet, "times", FieldValue::Str("x".into())),
            Err(BindError::UnsupportedFieldType("times".into()))
        );
    }

    #[test]
    fn redeclared_field_replaces_previous() {
        let schema = Schema::<Greet>::new("greet")
            .parameter(Param::new("name"), |c: &mut Greet, v: String| c.name = v)
            .parameter(Param::new("name").required(), |c: &mut Greet, v: String| c.name = v);

        assert_eq!(schema.descriptor().fields.len(), 1);
        assert!(schema.descriptor().fields[0].is_required());
    }
}
