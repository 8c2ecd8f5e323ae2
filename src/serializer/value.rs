//! Policy-aware serde serializer.
//!
//! Mirrors `serde_json::value::Serializer` except that struct field names go
//! through a [`FieldNamingPolicy`] on the way out. Map keys are passed through
//! untouched. Objects are built on `serde_json::Map`, which keeps insertion
//! order (`preserve_order`), so declaration order survives into the output.
//!
//! Depth is counted in JSON nesting levels: arrays and objects (including the
//! wrapper object of an enum variant) add one, `Option` and newtype wrappers
//! add nothing.
//!
//! Serde gives a struct with a `#[serde(flatten)]` field to the serializer as a
//! map of unknown length, indistinguishable from any other unsized map. Such
//! maps are rejected under a renaming policy instead of being sent with their
//! field names unrenamed.

use serde::ser::{self, Impossible, Serialize};
use serde_json::{Map, Number, Value};

use super::error::SerializationError;
use super::naming::FieldNamingPolicy;

/// Maximum JSON nesting depth before a payload is rejected.
pub const MAX_DEPTH: usize = 128;

/// Convert `value` into a `serde_json::Value`, renaming struct fields with `policy`.
pub fn to_value<T>(value: &T, policy: &FieldNamingPolicy) -> Result<Value, SerializationError>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer { policy, depth: 0 })
}

/// Render `value` as compact JSON text, renaming struct fields with `policy`.
pub fn to_json<T>(value: &T, policy: &FieldNamingPolicy) -> Result<String, SerializationError>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value, policy)?;
    Ok(serde_json::to_string(&value)?)
}

#[derive(Clone, Copy)]
struct ValueSerializer<'a> {
    policy: &'a FieldNamingPolicy,
    depth: usize,
}

impl<'a> ValueSerializer<'a> {
    fn nested(self) -> Result<Self, SerializationError> {
        let depth = self.depth + 1;
        if depth > MAX_DEPTH {
            return Err(SerializationError::DepthLimitExceeded(MAX_DEPTH));
        }
        Ok(ValueSerializer {
            policy: self.policy,
            depth,
        })
    }
}

impl<'a> ser::Serializer for ValueSerializer<'a> {
    type Ok = Value;
    type Error = SerializationError;

    type SerializeSeq = SerializeVec<'a>;
    type SerializeTuple = SerializeVec<'a>;
    type SerializeTupleStruct = SerializeVec<'a>;
    type SerializeTupleVariant = SerializeTupleVariant<'a>;
    type SerializeMap = SerializeMap<'a>;
    type SerializeStruct = SerializeStruct<'a>;
    type SerializeStructVariant = SerializeStructVariant<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value, SerializationError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, SerializationError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value, SerializationError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value, SerializationError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value, SerializationError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, SerializationError> {
        if let Ok(v) = i64::try_from(v) {
            self.serialize_i64(v)
        } else if let Ok(v) = u64::try_from(v) {
            self.serialize_u64(v)
        } else {
            Err(SerializationError::Custom(format!("{} is out of range", v)))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value, SerializationError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value, SerializationError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value, SerializationError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value, SerializationError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, SerializationError> {
        u64::try_from(v)
            .map_err(|_| SerializationError::Custom(format!("{} is out of range", v)))
            .and_then(|v| self.serialize_u64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, SerializationError> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value, SerializationError> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or(SerializationError::NonFiniteNumber(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, SerializationError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, SerializationError> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, SerializationError> {
        Ok(Value::Array(v.iter().map(|&b| Value::Number(b.into())).collect()))
    }

    fn serialize_none(self) -> Result<Value, SerializationError> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, SerializationError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, SerializationError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, SerializationError> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::new();
        map.insert(variant.to_owned(), value.serialize(self.nested()?)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'a>, SerializationError> {
        Ok(SerializeVec {
            ser: self.nested()?,
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'a>, SerializationError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec<'a>, SerializationError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant<'a>, SerializationError> {
        Ok(SerializeTupleVariant {
            ser: self.nested()?,
            name: variant.to_owned(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap<'a>, SerializationError> {
        if len.is_none() && !self.policy.is_identity() {
            return Err(SerializationError::UnsizedMap);
        }
        Ok(SerializeMap {
            ser: self.nested()?,
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<SerializeStruct<'a>, SerializationError> {
        Ok(SerializeStruct {
            ser: self.nested()?,
            map: Map::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant<'a>, SerializationError> {
        Ok(SerializeStructVariant {
            ser: self.nested()?,
            name: variant.to_owned(),
            map: Map::new(),
        })
    }
}

struct SerializeVec<'a> {
    ser: ValueSerializer<'a>,
    vec: Vec<Value>,
}

impl<'a> ser::SerializeSeq for SerializeVec<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializationError> {
        Ok(Value::Array(self.vec))
    }
}

impl<'a> ser::SerializeTuple for SerializeVec<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SerializationError> {
        ser::SerializeSeq::end(self)
    }
}

impl<'a> ser::SerializeTupleStruct for SerializeVec<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SerializationError> {
        ser::SerializeSeq::end(self)
    }
}

struct SerializeTupleVariant<'a> {
    ser: ValueSerializer<'a>,
    name: String,
    vec: Vec<Value>,
}

impl<'a> ser::SerializeTupleVariant for SerializeTupleVariant<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializationError> {
        let mut object = Map::new();
        object.insert(self.name, Value::Array(self.vec));
        Ok(Value::Object(object))
    }
}

struct SerializeMap<'a> {
    ser: ValueSerializer<'a>,
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl<'a> ser::SerializeMap for SerializeMap<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        let key = self.next_key.take().ok_or_else(|| {
            SerializationError::Custom("map value serialized before its key".to_string())
        })?;
        self.map.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializationError> {
        Ok(Value::Object(self.map))
    }
}

struct SerializeStruct<'a> {
    ser: ValueSerializer<'a>,
    map: Map<String, Value>,
}

impl<'a> ser::SerializeStruct for SerializeStruct<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(self.ser.policy.apply(key), value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializationError> {
        Ok(Value::Object(self.map))
    }
}

struct SerializeStructVariant<'a> {
    ser: ValueSerializer<'a>,
    name: String,
    map: Map<String, Value>,
}

impl<'a> ser::SerializeStructVariant for SerializeStructVariant<'a> {
    type Ok = Value;
    type Error = SerializationError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), SerializationError>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(self.ser.policy.apply(key), value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializationError> {
        let mut object = Map::new();
        object.insert(self.name, Value::Object(self.map));
        Ok(Value::Object(object))
    }
}

/// Accepts only values that have a natural JSON object key form.
struct MapKeySerializer;

fn key_must_be_string() -> SerializationError {
    SerializationError::KeyMustBeString
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = SerializationError;

    type SerializeSeq = Impossible<String, SerializationError>;
    type SerializeTuple = Impossible<String, SerializationError>;
    type SerializeTupleStruct = Impossible<String, SerializationError>;
    type SerializeTupleVariant = Impossible<String, SerializationError>;
    type SerializeMap = Impossible<String, SerializationError>;
    type SerializeStruct = Impossible<String, SerializationError>;
    type SerializeStructVariant = Impossible<String, SerializationError>;

    fn serialize_bool(self, v: bool) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_char(self, v: char) -> Result<String, SerializationError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, SerializationError> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_none(self) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_string())
    }

    fn serialize_unit(self) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, SerializationError> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, SerializationError>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, SerializationError> {
        Err(key_must_be_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, SerializationError> {
        Err(key_must_be_string())
    }
}
