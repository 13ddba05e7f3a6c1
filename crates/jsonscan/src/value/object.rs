use std::borrow::Cow;

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::FromPrimitive;

use super::Value;
use crate::error::ValueError;

/// A JSON object: unique string keys mapped to values.
///
/// Keys keep insertion order, which the compact writer preserves; equality
/// ignores order. Inserting an existing key replaces its value.
///
/// An object may carry a *path name*, a slash-delimited address such as
/// `/meta/vtag` used only to make accessor errors point at the right field.
/// Path names never affect equality, hashing or serialization.
///
/// ```rust
/// use jsonscan::{Object, Value};
///
/// let mut root = Object::with_path_tracking();
/// root.insert("meta", Object::new());
/// let meta = root.get_object("meta").unwrap();
/// assert_eq!(meta.path_name(), Some("/meta"));
/// assert_eq!(
///     meta.get_str("vtag").unwrap_err().to_string(),
///     "missing field /meta/vtag"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Value>,
    path_name: Option<String>,
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A root object that assigns path names to nested objects.
    #[must_use]
    pub fn with_path_tracking() -> Self {
        Self {
            entries: IndexMap::new(),
            path_name: Some(String::new()),
        }
    }

    pub(crate) fn with_path_name(path_name: Option<String>) -> Self {
        Self {
            entries: IndexMap::new(),
            path_name,
        }
    }

    /// This object's path name, if path tracking reached it. The root of a
    /// tracked tree has the empty path.
    #[must_use]
    pub fn path_name(&self) -> Option<&str> {
        self.path_name.as_deref()
    }

    /// Whether children inserted into this object receive path names.
    #[must_use]
    pub fn tracks_paths(&self) -> bool {
        self.path_name.is_some()
    }

    /// Turns path tracking on (or off) for this object and renames every
    /// nested object below it.
    pub fn set_path_tracking(&mut self, enabled: bool) {
        if enabled {
            let path = self.path_name.take().unwrap_or_default();
            self.assign_path(path);
        } else {
            self.clear_paths();
        }
    }

    fn assign_path(&mut self, path: String) {
        for (key, value) in &mut self.entries {
            assign_value_path(value, format!("{path}/{key}"));
        }
        self.path_name = Some(path);
    }

    fn clear_paths(&mut self) {
        self.path_name = None;
        for value in self.entries.values_mut() {
            clear_value_paths(value);
        }
    }

    /// The address of `key` inside this object, for diagnostics. Falls back to
    /// the bare key when the object is untracked.
    #[must_use]
    pub fn field_path(&self, key: &str) -> String {
        match &self.path_name {
            Some(path) => format!("{path}/{key}"),
            None => key.to_owned(),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// If this object tracks paths and `value` is an object, the child (and
    /// every object below it) is renamed to its new address.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let mut value = value.into();
        if self.path_name.is_some() {
            assign_value_path(&mut value, self.field_path(&key));
        }
        self.entries.insert(key, value)
    }

    /// Insert for values whose path names are already final.
    pub(crate) fn insert_parsed(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Looks a key up without treating absence as an error.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    // ------------------------------------------------------------------
    // Strict accessors
    // ------------------------------------------------------------------

    /// The value at `key`.
    ///
    /// # Errors
    ///
    /// [`ValueError::MissingField`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value, ValueError> {
        self.entries.get(key).ok_or_else(|| ValueError::MissingField {
            path: self.field_path(key),
        })
    }

    fn wrong_type(&self, key: &str, expected: &'static str, found: &Value) -> ValueError {
        ValueError::WrongType {
            path: self.field_path(key),
            expected,
            found: found.type_tag(),
        }
    }

    /// # Errors
    ///
    /// Fails if the key is absent or not a string.
    pub fn get_str(&self, key: &str) -> Result<&str, ValueError> {
        match self.get(key)? {
            Value::String(s) => Ok(s),
            other => Err(self.wrong_type(key, "string", other)),
        }
    }

    /// # Errors
    ///
    /// Fails if the key is absent or not a number.
    pub fn get_f64(&self, key: &str) -> Result<f64, ValueError> {
        match self.get(key)? {
            Value::Number(n) => Ok(*n),
            other => Err(self.wrong_type(key, "number", other)),
        }
    }

    /// An integer field, whether it was stored as a big integer or as an
    /// integral number.
    ///
    /// # Errors
    ///
    /// Fails if the key is absent or not an integer.
    pub fn get_big_int(&self, key: &str) -> Result<Cow<'_, BigInt>, ValueError> {
        match self.get(key)? {
            Value::BigInt(n) => Ok(Cow::Borrowed(n)),
            Value::Number(n) if n.fract() == 0.0 => BigInt::from_f64(*n)
                .map(Cow::Owned)
                .ok_or_else(|| self.wrong_type(key, "integer", &Value::Number(*n))),
            other => Err(self.wrong_type(key, "integer", other)),
        }
    }

    /// # Errors
    ///
    /// Fails if the key is absent or not a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool, ValueError> {
        match self.get(key)? {
            Value::Boolean(b) => Ok(*b),
            other => Err(self.wrong_type(key, "boolean", other)),
        }
    }

    /// # Errors
    ///
    /// Fails if the key is absent or not an object.
    pub fn get_object(&self, key: &str) -> Result<&Object, ValueError> {
        match self.get(key)? {
            Value::Object(o) => Ok(o),
            other => Err(self.wrong_type(key, "object", other)),
        }
    }

    /// # Errors
    ///
    /// Fails if the key is absent or not an array.
    pub fn get_array(&self, key: &str) -> Result<&[Value], ValueError> {
        match self.get(key)? {
            Value::Array(a) => Ok(a),
            other => Err(self.wrong_type(key, "array", other)),
        }
    }

    // ------------------------------------------------------------------
    // Lenient accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn str_or<'s>(&'s self, key: &str, default: &'s str) -> &'s str {
        self.get_str(key).unwrap_or(default)
    }

    #[must_use]
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    #[must_use]
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// The object at `key`, or an empty one if it is absent or not an object.
    #[must_use]
    pub fn object_or_empty(&self, key: &str) -> Cow<'_, Object> {
        match self.get_object(key) {
            Ok(o) => Cow::Borrowed(o),
            Err(_) => Cow::Owned(Object::with_path_name(
                self.path_name.as_ref().map(|_| self.field_path(key)),
            )),
        }
    }

    /// The array at `key`, or an empty slice if it is absent or not an array.
    #[must_use]
    pub fn array_or_empty(&self, key: &str) -> &[Value] {
        self.get_array(key).unwrap_or(&[])
    }
}

fn assign_value_path(value: &mut Value, path: String) {
    match value {
        Value::Object(child) => child.assign_path(path),
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                assign_value_path(item, format!("{path}/{index}"));
            }
        }
        _ => {}
    }
}

fn clear_value_paths(value: &mut Value) {
    match value {
        Value::Object(child) => child.clear_paths(),
        Value::Array(items) => items.iter_mut().for_each(clear_value_paths),
        _ => {}
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object;

    #[test]
    fn last_write_wins() {
        let mut o = Object::new();
        assert_eq!(o.insert("a", 1.0), None);
        assert_eq!(o.insert("a", 2.0), Some(Value::Number(1.0)));
        assert_eq!(o.len(), 1);
        assert_eq!(o.get_f64("a").unwrap(), 2.0);
    }

    #[test]
    fn equality_ignores_order_and_paths() {
        let a = object! { "x" => 1.0, "y" => "two" };
        let mut b = Object::with_path_tracking();
        b.insert("y", "two");
        b.insert("x", 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn nested_paths_propagate() {
        let mut meta = Object::new();
        meta.insert("vtag", object! { "tag" => "v1" });
        let mut root = Object::with_path_tracking();
        root.insert("meta", meta);

        let meta = root.get_object("meta").unwrap();
        assert_eq!(meta.path_name(), Some("/meta"));
        assert_eq!(meta.get_object("vtag").unwrap().path_name(), Some("/meta/vtag"));
    }

    #[test]
    fn paths_reach_objects_inside_arrays() {
        let mut root = Object::with_path_tracking();
        root.insert("rows", vec![Value::Null, Value::from(object! { "k" => 1 })]);
        let row = root.get_array("rows").unwrap()[1].as_object().unwrap();
        assert_eq!(row.path_name(), Some("/rows/1"));
    }

    #[test]
    fn enabling_tracking_renames_existing_children() {
        let mut root = object! { "a" => object! { "b" => object! {} } };
        assert_eq!(root.get_object("a").unwrap().path_name(), None);
        root.set_path_tracking(true);
        let a = root.get_object("a").unwrap();
        assert_eq!(a.path_name(), Some("/a"));
        assert_eq!(a.get_object("b").unwrap().path_name(), Some("/a/b"));
        root.set_path_tracking(false);
        assert_eq!(root.get_object("a").unwrap().path_name(), None);
    }

    #[test]
    fn strict_accessors_report_paths() {
        let mut root = Object::with_path_tracking();
        root.insert("meta", object! { "count" => "three" });
        let meta = root.get_object("meta").unwrap();
        assert_eq!(
            meta.get_f64("count").unwrap_err(),
            ValueError::WrongType {
                path: "/meta/count".into(),
                expected: "number",
                found: "string",
            }
        );
        assert_eq!(
            meta.get_bool("missing").unwrap_err(),
            ValueError::MissingField {
                path: "/meta/missing".into()
            }
        );
    }

    #[test]
    fn untracked_errors_use_bare_key() {
        let o = Object::new();
        assert_eq!(o.get("k").unwrap_err().to_string(), "missing field k");
    }

    #[test]
    fn lenient_accessors_default() {
        let o = object! { "s" => "x", "n" => 2.0, "b" => true, "arr" => vec![Value::Null] };
        assert_eq!(o.str_or("s", "d"), "x");
        assert_eq!(o.str_or("n", "d"), "d");
        assert_eq!(o.f64_or("n", 0.0), 2.0);
        assert_eq!(o.f64_or("zzz", 7.0), 7.0);
        assert!(o.bool_or("b", false));
        assert!(o.object_or_empty("s").is_empty());
        assert_eq!(o.array_or_empty("arr").len(), 1);
        assert!(o.array_or_empty("nope").is_empty());
    }

    #[test]
    fn big_int_accessor_accepts_integral_numbers() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        let o = object! { "n" => 42.0, "big" => big.clone(), "frac" => 1.5 };
        assert_eq!(o.get_big_int("n").unwrap().into_owned(), BigInt::from(42));
        assert_eq!(o.get_big_int("big").unwrap().as_ref(), &big);
        assert!(o.get_big_int("frac").is_err());
    }
}
