//! Value converters: the bridge between a property's value and what the grid shows.
//!
//! Three shapes cover everything the grid needs:
//! - [`ParseConverter`]: a pure parse/format function pair.
//! - [`DropDownConverter`]: a set of standard values, fixed or recomputed on every call.
//! - Expandable converters implement [`ValueConverter::properties`] and hand out
//!   synthetic sub-properties computed from the context.

use crate::descriptor::error::ConversionError;
use crate::descriptor::property::PropertyDescriptor;
use crate::descriptor::registry::DescriptorRegistry;
use crate::descriptor::value::{Value, ValueKind};
use std::any::Any;
use std::sync::Arc;

/// What a converter may look at: the registry, the object owning the property, and
/// the property itself.
#[derive(Clone, Copy)]
pub struct ConverterContext<'a> {
    pub registry: &'a DescriptorRegistry,
    pub instance: Option<&'a dyn Any>,
    pub property: Option<&'a PropertyDescriptor>,
}

impl<'a> ConverterContext<'a> {
    pub fn new(registry: &'a DescriptorRegistry) -> Self {
        Self {
            registry,
            instance: None,
            property: None,
        }
    }

    pub fn with_instance(mut self, instance: &'a dyn Any) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn with_property(mut self, property: &'a PropertyDescriptor) -> Self {
        self.property = Some(property);
        self
    }

    pub fn instance_as<T: Any>(&self) -> Option<&'a T> {
        self.instance.and_then(|i| i.downcast_ref::<T>())
    }
}

pub trait ValueConverter: Send + Sync {
    fn can_convert_from(&self, source: ValueKind) -> bool {
        source == ValueKind::Text
    }

    fn try_convert_from(
        &self,
        ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError>;

    /// Convert user text; on any failure the previous value comes back unchanged.
    fn convert_from(&self, ctx: &ConverterContext<'_>, text: &str, previous: &Value) -> Value {
        match self.try_convert_from(ctx, text) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("{err}; keeping previous value");
                previous.clone()
            }
        }
    }

    fn convert_to(&self, _ctx: &ConverterContext<'_>, value: &Value) -> String {
        value.to_string()
    }

    fn standard_values_supported(&self, _ctx: &ConverterContext<'_>) -> bool {
        false
    }

    fn standard_values(&self, _ctx: &ConverterContext<'_>) -> Vec<Value> {
        Vec::new()
    }

    /// Synthetic sub-properties. `None` means "not expandable by this converter".
    fn properties(&self, _ctx: &ConverterContext<'_>) -> Option<Vec<Arc<PropertyDescriptor>>> {
        None
    }
}

/// String <-> value through a pair of plain functions.
#[derive(Clone, Copy)]
pub struct ParseConverter {
    target: ValueKind,
    parse: fn(&str) -> Result<Value, String>,
    format: fn(&Value) -> String,
}

impl ParseConverter {
    pub const fn new(
        target: ValueKind,
        parse: fn(&str) -> Result<Value, String>,
        format: fn(&Value) -> String,
    ) -> Self {
        Self {
            target,
            parse,
            format,
        }
    }

    pub fn text() -> Self {
        Self::new(ValueKind::Text, |s| Ok(Value::Text(s.to_string())), format_plain)
    }

    pub fn int() -> Self {
        Self::new(
            ValueKind::Int,
            |s| s.trim().parse::<i64>().map(Value::Int).map_err(|e| e.to_string()),
            format_plain,
        )
    }

    pub fn float() -> Self {
        Self::new(ValueKind::Float, parse_float, format_plain)
    }

    pub fn target(&self) -> ValueKind {
        self.target
    }
}

fn format_plain(value: &Value) -> String {
    value.to_string()
}

fn parse_float(s: &str) -> Result<Value, String> {
    let v = s.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if v.is_finite() {
        Ok(Value::Float(v))
    } else {
        Err("not a finite number".to_string())
    }
}

impl ValueConverter for ParseConverter {
    fn try_convert_from(
        &self,
        _ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError> {
        (self.parse)(text).map_err(|reason| ConversionError::new(text, self.target, reason))
    }

    fn convert_to(&self, _ctx: &ConverterContext<'_>, value: &Value) -> String {
        (self.format)(value)
    }
}

type LiveValues = Box<dyn Fn(&ConverterContext<'_>) -> Vec<Value> + Send + Sync>;

enum StandardValues {
    Fixed(Vec<Value>),
    Live(LiveValues),
}

/// Dropdown of allowed values. Text converts back by matching a value's rendering.
pub struct DropDownConverter {
    values: StandardValues,
}

impl DropDownConverter {
    pub fn fixed(values: Vec<Value>) -> Self {
        Self {
            values: StandardValues::Fixed(values),
        }
    }

    /// Values are recomputed on every call so the list follows its source.
    pub fn live<F>(values: F) -> Self
    where
        F: Fn(&ConverterContext<'_>) -> Vec<Value> + Send + Sync + 'static,
    {
        Self {
            values: StandardValues::Live(Box::new(values)),
        }
    }

    pub fn bools() -> Self {
        Self::fixed(vec![Value::Bool(true), Value::Bool(false)])
    }
}

impl ValueConverter for DropDownConverter {
    fn try_convert_from(
        &self,
        ctx: &ConverterContext<'_>,
        text: &str,
    ) -> Result<Value, ConversionError> {
        let wanted = text.trim();
        let values = self.standard_values(ctx);
        let target = values.first().map(Value::kind).unwrap_or(ValueKind::Empty);
        values
            .into_iter()
            .find(|v| self.convert_to(ctx, v).eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::new(text, target, "not one of the standard values"))
    }

    fn standard_values_supported(&self, _ctx: &ConverterContext<'_>) -> bool {
        true
    }

    fn standard_values(&self, ctx: &ConverterContext<'_>) -> Vec<Value> {
        match &self.values {
            StandardValues::Fixed(values) => values.clone(),
            StandardValues::Live(values) => values(ctx),
        }
    }
}
