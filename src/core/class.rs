//! A small dynamic object model: classes with declared member tables,
//! single inheritance, and instances carrying a field table.
//!
//! Classes are immutable once built and shared behind `Arc`. Member lookup
//! walks the class itself first, then its base chain.

use crate::core::error::AccessError;
use crate::core::member::{Member, MemberResult, Property};
use crate::core::record::Kwargs;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Instance method run by [`Class::instantiate`], when resolvable.
pub const INIT: &str = "__init__";

pub struct Class {
    name: String,
    base: Option<Arc<Class>>,
    members: FxHashMap<String, Member>,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            base: None,
            members: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<Class>> {
        self.base.as_ref()
    }

    /// Member declared directly on this class (inherited members excluded).
    pub fn declared(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Names declared directly on this class, sorted.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// This class followed by its ancestors, nearest first.
    pub fn ancestry(&self) -> Vec<&Class> {
        let mut chain = vec![self];
        let mut current = self.base.as_deref();
        while let Some(class) = current {
            chain.push(class);
            current = class.base.as_deref();
        }
        chain
    }

    /// Find `name` on this class or the nearest ancestor declaring it.
    pub fn resolve(&self, name: &str) -> Option<(&Class, &Member)> {
        self.ancestry()
            .into_iter()
            .find_map(|class| class.members.get(name).map(|m| (class, m)))
    }

    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.ancestry().into_iter().any(|c| std::ptr::eq(c, other))
    }

    fn no_such_member(&self, name: &str) -> anyhow::Error {
        AccessError::NoSuchMember {
            class: self.name.clone(),
            name: name.to_string(),
        }
        .into()
    }

    /// Class-level call with positional arguments only.
    pub fn call(self: &Arc<Self>, name: &str, args: &[Value]) -> MemberResult {
        self.call_with(name, args, &Kwargs::new())
    }

    /// Class-level call. Class methods receive this class; static methods
    /// receive nothing. Instance methods and properties need an instance.
    pub fn call_with(self: &Arc<Self>, name: &str, args: &[Value], kwargs: &Kwargs) -> MemberResult {
        let (_, member) = self.resolve(name).ok_or_else(|| self.no_such_member(name))?;
        match member {
            Member::ClassMethod(f) => f(self, args, kwargs),
            Member::StaticMethod(f) => f(args, kwargs),
            Member::Method(_) => Err(AccessError::NeedsInstance {
                class: self.name.clone(),
                name: name.to_string(),
            }
            .into()),
            Member::Property(_) => Err(AccessError::NotCallable {
                class: self.name.clone(),
                name: name.to_string(),
            }
            .into()),
        }
    }

    pub fn instantiate(self: &Arc<Self>) -> MemberResult<Instance> {
        self.instantiate_with(&[], &Kwargs::new())
    }

    /// Create an instance and run `__init__` with the given arguments if the
    /// class (or an ancestor) declares one.
    pub fn instantiate_with(self: &Arc<Self>, args: &[Value], kwargs: &Kwargs) -> MemberResult<Instance> {
        let mut instance = Instance {
            class: Arc::clone(self),
            fields: FxHashMap::default(),
        };
        if let Some((_, Member::Method(init))) = self.resolve(INIT) {
            let init = Arc::clone(init);
            init(&mut instance, args, kwargs)?;
        }
        Ok(instance)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|b| b.name()))
            .field("members", &self.declared_names())
            .finish()
    }
}

/// Fluent declaration of a [`Class`].
///
/// Declaring a name twice keeps the later declaration.
pub struct ClassBuilder {
    name: String,
    base: Option<Arc<Class>>,
    members: FxHashMap<String, Member>,
}

impl ClassBuilder {
    pub fn extends(mut self, base: &Arc<Class>) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::method(f))
    }

    pub fn class_method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Arc<Class>, &[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::class_method(f))
    }

    pub fn static_method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> MemberResult + Send + Sync + 'static,
    {
        self.member(name, Member::static_method(f))
    }

    pub fn property(self, name: impl Into<String>, property: Property) -> Self {
        self.member(name, Member::Property(property))
    }

    pub fn build(self) -> Arc<Class> {
        Arc::new(Class {
            name: self.name,
            base: self.base,
            members: self.members,
        })
    }

    /// Used by the spy trigger, which assembles the member table itself.
    pub(crate) fn from_parts(
        name: String,
        base: Option<Arc<Class>>,
        members: FxHashMap<String, Member>,
    ) -> Arc<Class> {
        ClassBuilder { name, base, members }.build()
    }
}

/// An object of some [`Class`], with its own field table.
pub struct Instance {
    class: Arc<Class>,
    fields: FxHashMap<String, Value>,
}

impl Instance {
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn take_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    fn property(&self, name: &str) -> Option<Property> {
        self.class
            .resolve(name)
            .and_then(|(_, member)| member.as_property().cloned())
    }

    fn access_error(&self, name: &str, build: fn(String, String) -> AccessError) -> anyhow::Error {
        build(self.class.name.clone(), name.to_string()).into()
    }

    /// Call with positional arguments only.
    pub fn call(&mut self, name: &str, args: &[Value]) -> MemberResult {
        self.call_with(name, args, &Kwargs::new())
    }

    /// Call a member through this instance. Instance methods receive the
    /// instance, class methods its class, static methods nothing.
    pub fn call_with(&mut self, name: &str, args: &[Value], kwargs: &Kwargs) -> MemberResult {
        let class = Arc::clone(&self.class);
        let (_, member) = class.resolve(name).ok_or_else(|| class.no_such_member(name))?;
        match member {
            Member::Method(f) => f(self, args, kwargs),
            Member::ClassMethod(f) => f(&class, args, kwargs),
            Member::StaticMethod(f) => f(args, kwargs),
            Member::Property(_) => Err(self.access_error(name, |class, name| {
                AccessError::NotCallable { class, name }
            })),
        }
    }

    /// Read an attribute: a property's getter if `name` resolves to a
    /// property, otherwise the instance field.
    pub fn get(&self, name: &str) -> MemberResult {
        if let Some(property) = self.property(name) {
            let getter = property.get.ok_or_else(|| {
                self.access_error(name, |class, name| AccessError::Unreadable { class, name })
            })?;
            return getter(self);
        }
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| self.class.no_such_member(name))
    }

    /// Assign an attribute. Properties without a setter are read-only.
    pub fn set(&mut self, name: &str, value: Value) -> MemberResult<()> {
        if let Some(property) = self.property(name) {
            let setter = property.set.ok_or_else(|| {
                self.access_error(name, |class, name| AccessError::ReadOnly { class, name })
            })?;
            return setter(self, value);
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Delete an attribute. Properties without a deleter cannot be deleted.
    pub fn delete(&mut self, name: &str) -> MemberResult<()> {
        if let Some(property) = self.property(name) {
            let deleter = property.delete.ok_or_else(|| {
                self.access_error(name, |class, name| AccessError::Undeletable { class, name })
            })?;
            return deleter(self);
        }
        self.fields
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| self.class.no_such_member(name))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &self.fields)
            .finish()
    }
}
