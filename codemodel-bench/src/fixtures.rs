//! Sample models shared by the benchmarks.

use codemodel_core::{ClassId, Mods, Result, TypeId};
use codemodel_model::{ClassKind, CodeModel, Expr, Invocation};

/// Adds a bean with `fields` properties, a getter and setter per property
/// and a `toString` that concatenates them.
///
/// # Errors
/// Returns an error if `fqn` is already declared.
pub fn bean(cm: &mut CodeModel, fqn: &str, fields: usize) -> Result<ClassId> {
    let class = cm.new_class(fqn, ClassKind::Class)?;
    let string = cm.ref_name("java.lang.String");
    let list = cm.ref_name("java.util.List");
    let strings = cm.narrow(list, &[string])?;
    let builder = cm.ref_name("java.lang.StringBuilder");

    for index in 0..fields {
        let name = format!("value{index}");
        let ty = match index % 3 {
            0 => TypeId::INT,
            1 => string,
            _ => strings,
        };
        let field = cm.class_mut(class).field(Mods::PRIVATE, ty, &name)?;

        let getter = cm
            .class_mut(class)
            .method(Mods::PUBLIC, ty, &format!("getValue{index}"))?;
        let body = cm.method_mut(getter).body();
        cm.block_mut(body).return_value(field);

        let setter = cm
            .class_mut(class)
            .method(Mods::PUBLIC, TypeId::VOID, &format!("setValue{index}"))?;
        let mut method = cm.method_mut(setter);
        let param = method.param(Mods::FINAL, ty, &name)?;
        let body = method.body();
        cm.block_mut(body).assign(Expr::this_field(name), param);
    }

    let to_string = cm
        .class_mut(class)
        .method(Mods::PUBLIC, string, "toString")?;
    let body = cm.method_mut(to_string).body();
    let mut block = cm.block_mut(body);
    let out = block.decl_init(Mods::FINAL, builder, "out", Invocation::new_instance(builder))?;
    for index in 0..fields {
        let entry = Expr::lit(format!("value{index}=")).plus(Expr::field(format!("value{index}")));
        block.invoke(Invocation::method(Expr::from(out), "append").arg(entry));
    }
    block.return_value(Invocation::method(Expr::from(out), "toString"));
    Ok(class)
}

/// A model with `classes` beans spread over four packages.
///
/// # Errors
/// Returns an error if a class cannot be declared.
pub fn beans(classes: usize, fields: usize) -> Result<CodeModel> {
    let mut cm = CodeModel::new();
    for index in 0..classes {
        let fqn = format!("com.acme.p{}.Bean{index}", index % 4);
        bean(&mut cm, &fqn, fields)?;
    }
    Ok(cm)
}
