//! AST produced by the parser and consumed by the generator.
//!
//! The tree is built once per compilation run and never mutated
//! afterwards: a [`Module`] exclusively owns its [`Iface`]s, each of
//! which exclusively owns its [`Func`]s. Interfaces and functions keep
//! declaration order so that emission is byte-reproducible.

use md5::{Digest, Md5};

/// Derive the wire identifier for a name: the MD5 digest of the name,
/// truncated to its first 16 hex characters.
///
/// This is a pure, deterministic tag used so dispatch can switch on a
/// compact value instead of comparing strings, and so identifiers stay
/// stable across recompilation as long as names do not change. It is
/// not a uniqueness guarantee: two distinct names hashing to the same
/// prefix collide silently. Known limitation.
pub fn wire_id(name: &str) -> String {
    let digest = Md5::digest(name.as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// A named operation: ordered `(type, name)` argument pairs and a
/// result type. Type text is opaque, copied verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub name: String,
    /// `(type, name)` per argument, in argument order.
    pub args: Vec<(String, String)>,
    pub res: String,
}

impl Func {
    pub fn uid(&self) -> String {
        wire_id(&self.name)
    }
}

/// A named group of functions sharing a dispatch identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iface {
    pub name: String,
    funcs: Vec<Func>,
}

impl Iface {
    pub fn new(name: impl Into<String>) -> Self {
        Iface {
            name: name.into(),
            funcs: Vec::new(),
        }
    }

    pub fn uid(&self) -> String {
        wire_id(&self.name)
    }

    /// Insert a function. A duplicate name replaces the earlier value in
    /// place: the last declaration wins, at the first declaration's
    /// position. This mirrors the language's historical behavior and is
    /// deliberately not an error.
    pub fn insert_func(&mut self, func: Func) {
        if let Some(slot) = self.funcs.iter_mut().find(|f| f.name == func.name) {
            *slot = func;
        } else {
            self.funcs.push(func);
        }
    }

    pub fn get_func(&self, name: &str) -> Option<&Func> {
        self.funcs.iter().find(|f| f.name == name)
    }

    /// Functions in declaration order.
    pub fn funcs(&self) -> &[Func] {
        &self.funcs
    }
}

/// Top-level named unit: includes plus interfaces. The name may be
/// namespaced (`a::b::c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    /// External file names referenced verbatim, in declaration order.
    pub includes: Vec<String>,
    ifaces: Vec<Iface>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            includes: Vec::new(),
            ifaces: Vec::new(),
        }
    }

    /// Insert an interface; same replacement semantics as
    /// [`Iface::insert_func`].
    pub fn insert_iface(&mut self, iface: Iface) {
        if let Some(slot) = self.ifaces.iter_mut().find(|i| i.name == iface.name) {
            *slot = iface;
        } else {
            self.ifaces.push(iface);
        }
    }

    pub fn get_iface(&self, name: &str) -> Option<&Iface> {
        self.ifaces.iter().find(|i| i.name == name)
    }

    /// Interfaces in declaration order.
    pub fn ifaces(&self) -> &[Iface] {
        &self.ifaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_id_is_deterministic() {
        let a = wire_id("greet");
        let b = wire_id("greet");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(wire_id("greet"), wire_id("greets"));
    }

    #[test]
    fn wire_id_matches_known_digests() {
        // Parity with output generated by earlier versions of the
        // compiler; these must never change.
        assert_eq!(wire_id("createWindow"), "7110f2964d70557a");
        assert_eq!(wire_id("greet"), "77f6fbc1bc9e0163");
        assert_eq!(wire_id("Greeter"), "dc048b8147f73934");
    }

    #[test]
    fn duplicate_function_keeps_first_position_and_last_value() {
        let mut iface = Iface::new("Calc");
        iface.insert_func(Func {
            name: "add".into(),
            args: vec![("int".into(), "a".into())],
            res: "int".into(),
        });
        iface.insert_func(Func {
            name: "sub".into(),
            args: vec![],
            res: "int".into(),
        });
        iface.insert_func(Func {
            name: "add".into(),
            args: vec![("long".into(), "a".into())],
            res: "long".into(),
        });

        let names: Vec<_> = iface.funcs().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["add", "sub"]);
        assert_eq!(iface.get_func("add").unwrap().res, "long");
    }

    #[test]
    fn lookup_by_name_works_alongside_ordered_walks() {
        let mut module = Module::new("demo");
        module.insert_iface(Iface::new("B"));
        module.insert_iface(Iface::new("A"));
        assert_eq!(module.ifaces()[0].name, "B");
        assert!(module.get_iface("A").is_some());
        assert!(module.get_iface("C").is_none());
    }
}
