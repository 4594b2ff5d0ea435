//! Lowering of the AST to C++ header text.
//!
//! Every function here is pure: AST node in, text fragment out. The
//! fragments are assembled by [`generate`] in a fixed order, walking
//! interfaces and functions in declaration order, so output is
//! byte-reproducible for identical input. Argument and result type
//! text is copied verbatim; the generator performs no validation or
//! reordering beyond what parsing already guarantees.
//!
//! The emitted header assumes an externally supplied transport
//! abstraction providing `invoke`, `call`, `mid`, `reply`-style
//! completion and `error` operations; nothing of that is generated
//! here.

use crate::ast::{Func, Iface, Module};

/// Assemble the whole output document for a parsed module.
///
/// Order: preamble, include directives, namespace open, one virtual
/// interface definition per interface, one client implementation per
/// interface, one dispatch implementation per interface, namespace
/// close.
pub fn generate(module: &Module, source_name: &str) -> String {
    let mut out = String::new();
    out.push_str("#pragma once\n");
    out.push_str(&format!("// Generated by ridl from {source_name}\n"));
    out.push_str("// DO NOT EDIT\n\n");

    let includes = gen_includes(&module.includes);
    if !includes.is_empty() {
        out.push_str(&includes);
        out.push('\n');
    }

    out.push_str(&format!("namespace {} {{\n\n", module.name));
    for iface in module.ifaces() {
        out.push_str(&gen_virtual_class(module, iface));
        out.push('\n');
    }
    for iface in module.ifaces() {
        out.push_str(&gen_client_class(iface));
        out.push('\n');
    }
    for iface in module.ifaces() {
        out.push_str(&gen_dispatch_func(iface));
        out.push('\n');
    }
    out.push_str(&format!("}} // namespace {}\n", module.name));
    out
}

fn gen_includes(includes: &[String]) -> String {
    includes
        .iter()
        .map(|name| format!("#include <{name}>\n"))
        .collect()
}

fn gen_virtual_class(module: &Module, iface: &Iface) -> String {
    let name = &iface.name;
    let mut out = String::new();
    out.push_str(&format!("struct I{name}\n"));
    out.push_str("{\n");
    out.push_str(&format!(
        "    static constexpr auto _UID = 0x{};\n",
        iface.uid()
    ));
    out.push_str(&format!(
        "    static constexpr auto _NAME = \"{}::{name}\";\n",
        module.name
    ));
    out.push('\n');
    out.push_str("    template <typename T>\n");
    out.push_str("    struct _Client;\n");
    out.push('\n');
    out.push_str("    auto _dispatch(auto);\n");
    out.push('\n');
    out.push_str(&format!("    virtual ~I{name}() = default;\n"));
    out.push('\n');
    for func in iface.funcs() {
        out.push_str(&gen_virtual_func(func));
    }
    out.push_str("};\n");
    out
}

fn gen_virtual_func(func: &Func) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "    static constexpr auto {}_UID = 0x{};\n",
        func.name,
        func.uid()
    ));
    out.push_str(&format!(
        "    virtual {} {}({}) = 0;\n",
        func.res,
        func.name,
        param_list(func)
    ));
    out
}

fn gen_client_class(iface: &Iface) -> String {
    let name = &iface.name;
    let mut out = String::new();
    out.push_str("template <typename T>\n");
    out.push_str(&format!("struct I{name}::_Client : public I{name}\n"));
    out.push_str("{\n");
    out.push_str("    T _t;\n");
    out.push('\n');
    out.push_str("    _Client(T t) : _t{t} {}\n");
    out.push('\n');
    for func in iface.funcs() {
        out.push_str(&gen_client_func(iface, func));
    }
    out.push_str("};\n");
    out
}

/// One forwarding method of the client stub: the direct call is turned
/// into a generic `invoke` parameterized by the interface, the
/// function's identifier constant, and its full signature (result type
/// first, then argument types); arguments are moved through.
fn gen_client_func(iface: &Iface, func: &Func) -> String {
    let mut signature = vec![func.res.clone()];
    signature.extend(func.args.iter().map(|(ty, _)| ty.clone()));
    let signature = signature.join(", ");
    let forwarded = func
        .args
        .iter()
        .map(|(_, name)| format!("std::move({name})"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str(&format!(
        "    {} {}({})\n",
        func.res,
        func.name,
        param_list(func)
    ));
    out.push_str("    {\n");
    out.push_str(&format!(
        "        return _t.template invoke<I{}, {}_UID, {signature}>({forwarded});\n",
        iface.name, func.name
    ));
    out.push_str("    }\n");
    out
}

fn gen_dispatch_func(iface: &Iface) -> String {
    let name = &iface.name;
    let mut out = String::new();
    out.push_str(&format!("auto I{name}::_dispatch(auto o)\n"));
    out.push_str("{\n");
    out.push_str("    switch (o.mid())\n");
    out.push_str("    {\n");
    for func in iface.funcs() {
        out.push_str(&gen_dispatch_case(func));
    }
    out.push_str("    default:\n");
    out.push_str("        return o.error();\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// One dispatch branch: already-decoded arguments are forwarded from
/// the transport into the concrete virtual call, whose result flows
/// back through the transport's completion path.
fn gen_dispatch_case(func: &Func) -> String {
    let arg_types = func
        .args
        .iter()
        .map(|(ty, _)| ty.clone())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str(&format!("    case {}_UID:\n", func.name));
    out.push_str(&format!(
        "        return o.template call<{arg_types}>([&]<typename... Args>(Args &&...args) {{\n"
    ));
    out.push_str(&format!(
        "            return {}(std::forward<Args>(args)...);\n",
        func.name
    ));
    out.push_str("        });\n");
    out
}

fn param_list(func: &Func) -> String {
    func.args
        .iter()
        .map(|(ty, name)| format!("{ty} {name}"))
        .collect::<Vec<_>>()
        .join(", ")
}
