//! Structural guarantees of the translator: identity, sharing,
//! specialization and the rewrites of concatenations, membership tests,
//! aggregate assignments, loops and increments.

mod common;

use common::*;
use uhdm_ast::AstKind;
use uhdm_config::TranslateOptions;
use uhdm_diagnostics::DiagnosticSink;
use uhdm_model::{Direction, ObjectGraph, ObjectKind, OpType, Property, Relation};
use uhdm_translate::{Definition, Translator};

#[test]
fn same_object_translates_to_same_node() {
    let mut g = ObjectGraph::new();
    let a = g.ref_obj("a", None);
    let b = g.ref_obj("b", None);
    let op = g.operation(OpType::Add, &[a, b]);
    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    let first = t.translate_object(op).unwrap();
    let second = t.translate_object(op).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
    let before = t.ast().len();
    t.translate_object(op).unwrap();
    assert_eq!(t.ast().len(), before);
}

#[test]
fn repeated_definition_has_one_template() {
    let mut g = ObjectGraph::new();
    let sub = module_def(&mut g, "sub");
    let sub_again = module_def(&mut g, "sub");
    let d = design(&mut g, &[sub, sub_again, sub], &[]);
    let (out, _) = run(&g, d);
    let defs = out.forest.definitions();
    assert_eq!(names(&out.forest.ast, &defs), ["\\sub"]);
}

fn param(g: &mut ObjectGraph, value: &str) -> uhdm_model::ObjectId {
    g.build(ObjectKind::Parameter).name("W").value(value).id()
}

fn net(g: &mut ObjectGraph, name: &str) -> uhdm_model::ObjectId {
    g.build(ObjectKind::Net).name(name).id()
}

fn param_assign(g: &mut ObjectGraph, lhs: uhdm_model::ObjectId, value: i64) -> uhdm_model::ObjectId {
    let rhs = g.int_const(value);
    g.build(ObjectKind::ParamAssign)
        .handle(Relation::Lhs, lhs)
        .handle(Relation::Rhs, rhs)
        .id()
}

fn cell_types(out: &uhdm_translate::Translation, parent: &str) -> Vec<String> {
    let ast = &out.forest.ast;
    let Some(node) = out.forest.definition(parent) else {
        return Vec::new();
    };
    children_of_kind(ast, node, AstKind::Cell)
        .into_iter()
        .map(|c| ast.name(ast.children(c)[0]).to_string())
        .collect()
}

#[test]
fn instances_without_overrides_share_template() {
    let mut g = ObjectGraph::new();
    let w = param(&mut g, "UINT:8");
    let a = net(&mut g, "a");
    let sub = module_def(&mut g, "sub");
    g.edit(sub).child(Relation::Parameter, w).child(Relation::Net, a);
    let top = module_def(&mut g, "top");

    let u1 = module_inst(&mut g, "u1", "sub");
    let w1 = param(&mut g, "UINT:8");
    g.edit(u1).child(Relation::Parameter, w1);
    let u2 = module_inst(&mut g, "u2", "sub");
    let top_inst = module_inst(&mut g, "top", "top");
    g.edit(top_inst).children(Relation::Module, &[u1, u2]);
    let d = design(&mut g, &[sub, top], &[top_inst]);

    let (out, sink) = run(&g, d);
    let ast = &out.forest.ast;
    assert!(sink.diagnostics().is_empty());
    assert_eq!(names(ast, &out.forest.definitions()), ["\\sub", "\\top"]);

    let top_node = out.forest.definition("\\top").unwrap();
    let cells = children_of_kind(ast, top_node, AstKind::Cell);
    assert_eq!(names(ast, &cells), ["\\u1", "\\u2"]);
    for cell in cells {
        let cell_type = ast.children(cell)[0];
        assert_eq!(ast.kind(cell_type), AstKind::CellType);
        assert_eq!(ast.name(cell_type), "\\sub");
    }
}

#[test]
fn default_instances_before_their_definition_share_template() {
    let mut g = ObjectGraph::new();
    let top = module_def(&mut g, "top");
    let u1 = module_inst(&mut g, "u1", "sub");
    let w1 = param(&mut g, "UINT:8");
    g.edit(u1).child(Relation::Parameter, w1);
    let u2 = module_inst(&mut g, "u2", "sub");
    let w2 = param(&mut g, "UINT:8");
    g.edit(u2).child(Relation::Parameter, w2);
    g.edit(top).children(Relation::Module, &[u1, u2]);

    // Listed after the module that instantiates it.
    let w = param(&mut g, "UINT:8");
    let a = net(&mut g, "a");
    let sub = module_def(&mut g, "sub");
    g.edit(sub).child(Relation::Parameter, w).child(Relation::Net, a);
    let d = design(&mut g, &[top, sub], &[]);

    let (out, sink) = run(&g, d);
    assert!(sink.diagnostics().is_empty());
    assert_eq!(cell_types(&out, "\\top"), ["\\sub", "\\sub"]);
    let defs = names(&out.forest.ast, &out.forest.definitions());
    assert_eq!(defs, ["\\top", "\\sub"]);

    let ast = &out.forest.ast;
    let sub_node = out.forest.definition("\\sub").unwrap();
    assert_eq!(children_of_kind(ast, sub_node, AstKind::Parameter).len(), 1);
    assert_eq!(names(ast, &children_of_kind(ast, sub_node, AstKind::Wire)), ["\\a"]);
}

#[test]
fn assigned_parameter_specializes_even_before_definition() {
    let mut g = ObjectGraph::new();
    let top = module_def(&mut g, "top");
    let u1 = module_inst(&mut g, "u1", "sub");
    let w1 = param(&mut g, "UINT:4");
    let set_w = param_assign(&mut g, w1, 4);
    g.edit(u1)
        .child(Relation::Parameter, w1)
        .child(Relation::ParamAssign, set_w);
    let u2 = module_inst(&mut g, "u2", "sub");
    g.edit(top).children(Relation::Module, &[u1, u2]);
    let w = param(&mut g, "UINT:8");
    let sub = module_def(&mut g, "sub");
    g.edit(sub).child(Relation::Parameter, w);
    let d = design(&mut g, &[top, sub], &[]);

    let (out, _) = run(&g, d);
    assert_eq!(cell_types(&out, "\\top"), ["\\sub$top.u1", "\\sub"]);
}

#[test]
fn repeated_sightings_merge_into_template() {
    let mut g = ObjectGraph::new();
    let hi = g.int_const(3);
    let lo = g.int_const(0);
    let range = g
        .build(ObjectKind::Range)
        .handle(Relation::LeftRange, hi)
        .handle(Relation::RightRange, lo)
        .id();
    let a = net(&mut g, "a");
    let wide = g.build(ObjectKind::Net).name("s").child(Relation::Range, range).id();
    let first = module_def(&mut g, "sub");
    g.edit(first).children(Relation::Net, &[a, wide]);

    let b = net(&mut g, "b");
    let narrow = net(&mut g, "s");
    let second = module_def(&mut g, "sub");
    g.edit(second).children(Relation::Net, &[narrow, b]);
    let d = design(&mut g, &[first, second], &[]);

    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    t.translate_design(d).unwrap();
    let template = t.registry().template("\\sub").unwrap();
    assert_eq!(t.registry().memo(second), Some(template));
    assert_eq!(t.registry().definitions().count(), 1);

    let ast = t.ast();
    let wires = children_of_kind(ast, template, AstKind::Wire);
    assert_eq!(names(ast, &wires), ["\\a", "\\s", "\\b"]);
    // The second `s` replaced the first in place and kept its range.
    let s = wires[1];
    assert_eq!(t.registry().memo(narrow), Some(s));
    assert_eq!(child_kinds(ast, s), [AstKind::Range]);
}

#[test]
fn override_specializes_a_clone() {
    let mut g = ObjectGraph::new();
    let w = param(&mut g, "UINT:8");
    let a = net(&mut g, "a");
    let sub = module_def(&mut g, "sub");
    g.edit(sub).child(Relation::Parameter, w).child(Relation::Net, a);
    let top = module_def(&mut g, "top");

    let u1 = module_inst(&mut g, "u1", "sub");
    let w1 = param(&mut g, "UINT:16");
    let a1 = net(&mut g, "a");
    let set_w = param_assign(&mut g, w1, 16);
    g.edit(u1)
        .child(Relation::Parameter, w1)
        .child(Relation::ParamAssign, set_w)
        .child(Relation::Net, a1);
    let u2 = module_inst(&mut g, "u2", "sub");
    let w2 = param(&mut g, "UINT:8");
    g.edit(u2).child(Relation::Parameter, w2);
    let top_inst = module_inst(&mut g, "top", "top");
    g.edit(top_inst).children(Relation::Module, &[u1, u2]);
    let d = design(&mut g, &[sub, top], &[top_inst]);

    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    t.translate_design(d).unwrap();

    match t.registry().definition("\\sub$top.u1") {
        Some(Definition::Specialized { of, overrides, .. }) => {
            assert_eq!(of, "\\sub");
            assert_eq!(overrides, &["\\W".to_string()]);
        }
        other => panic!("expected a specialization, got {other:?}"),
    }
    let template = t.registry().template("\\sub").unwrap();
    let clone = t.registry().definition("\\sub$top.u1").unwrap().node();
    let ast = t.ast();
    assert_ne!(template, clone);

    let value_of = |def| {
        let p = ast.find_child_named(def, AstKind::Parameter, "\\W").unwrap();
        const_value(ast, ast.children(p)[0])
    };
    assert_eq!(value_of(clone), Some(16));
    assert_eq!(value_of(template), Some(8));

    let rest = |def| -> Vec<_> {
        ast.children(def)
            .iter()
            .copied()
            .filter(|&c| ast.kind(c) != AstKind::Parameter)
            .collect()
    };
    let (tr, cr) = (rest(template), rest(clone));
    assert_eq!(tr.len(), cr.len());
    for (x, y) in tr.iter().zip(&cr) {
        assert!(ast.structurally_eq(*x, *y));
    }

    let out = t.finish();
    let ast = &out.forest.ast;
    let top_node = out.forest.definition("\\top").unwrap();
    let cell_types: Vec<String> = children_of_kind(ast, top_node, AstKind::Cell)
        .into_iter()
        .map(|c| ast.name(ast.children(c)[0]).to_string())
        .collect();
    assert_eq!(cell_types, ["\\sub$top.u1", "\\sub"]);
    assert!(out.forest.definition("\\sub$top.u1").is_some());
}

#[test]
fn concatenation_reverses_operands() {
    let mut g = ObjectGraph::new();
    let ops: Vec<_> = ["a", "b", "c"].iter().map(|n| g.ref_obj(n, None)).collect();
    let concat = g.operation(OpType::Concat, &ops);
    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    let node = t.translate_object(concat).unwrap().unwrap();
    let ast = t.ast();
    assert_eq!(ast.kind(node), AstKind::Concat);
    assert_eq!(names(ast, ast.children(node)), ["\\c", "\\b", "\\a"]);
}

#[test]
fn inside_becomes_or_chain_of_equalities() {
    let mut g = ObjectGraph::new();
    let x = g.ref_obj("x", None);
    let c1 = g.int_const(1);
    let c2 = g.int_const(2);
    let c3 = g.int_const(3);
    let inside = g.operation(OpType::Inside, &[x, c1, c2, c3]);
    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    let root = t.translate_object(inside).unwrap().unwrap();
    let ast = t.ast();
    assert_eq!(ast.kind(root), AstKind::LogicOr);
    assert_eq!(ast.count_kind(root, AstKind::LogicOr), 2);
    assert_eq!(ast.count_kind(root, AstKind::Eq), 3);
    let mut values = Vec::new();
    ast.walk(root, |_, n| {
        if n.kind == AstKind::Eq {
            assert_eq!(ast.name(n.children[0]), "\\x");
            values.push(const_value(ast, n.children[1]));
        }
    });
    values.sort();
    assert_eq!(values, [Some(1), Some(2), Some(3)]);
}

fn struct_typedef(g: &mut ObjectGraph) -> uhdm_model::ObjectId {
    let bit = g.build(ObjectKind::LogicTypespec).id();
    let x = g
        .build(ObjectKind::TypespecMember)
        .name("x")
        .handle(Relation::Typespec, bit)
        .id();
    let y = g
        .build(ObjectKind::TypespecMember)
        .name("y")
        .handle(Relation::Typespec, bit)
        .id();
    g.build(ObjectKind::StructTypespec)
        .name("pair_t")
        .children(Relation::TypespecMember, &[x, y])
        .id()
}

#[test]
fn aggregate_assignment_expands_per_field() {
    let mut g = ObjectGraph::new();
    let ts = struct_typedef(&mut g);
    let s = g
        .build(ObjectKind::Variable)
        .name("s")
        .handle(Relation::Typespec, ts)
        .id();
    let one = g.int_const(1);
    let two = g.int_const(2);
    let tx = g
        .build(ObjectKind::TaggedPattern)
        .name("x")
        .handle(Relation::Pattern, one)
        .id();
    let ty = g
        .build(ObjectKind::TaggedPattern)
        .name("y")
        .handle(Relation::Pattern, two)
        .id();
    // Tags out of field order.
    let pattern = g.operation(OpType::AssignmentPattern, &[ty, tx]);
    let target = g.ref_obj("s", Some(s));
    let assign = g
        .build(ObjectKind::ContAssign)
        .handle(Relation::Lhs, target)
        .handle(Relation::Rhs, pattern)
        .id();
    let m = module_def(&mut g, "m");
    g.edit(m)
        .child(Relation::Typedef, ts)
        .child(Relation::Variables, s)
        .child(Relation::ContAssign, assign);
    let d = design(&mut g, &[m], &[]);

    let (out, sink) = run(&g, d);
    let ast = &out.forest.ast;
    let module = out.forest.definition("\\m").unwrap();
    let assigns = children_of_kind(ast, module, AstKind::Assign);
    assert_eq!(assigns.len(), 2);
    let targets: Vec<String> = assigns
        .iter()
        .map(|&a| ast.name(ast.children(a)[0]).to_string())
        .collect();
    assert_eq!(targets, ["\\s.x", "\\s.y"]);
    let values: Vec<_> = assigns
        .iter()
        .map(|&a| const_value(ast, ast.children(a)[1]))
        .collect();
    assert_eq!(values, [Some(1), Some(2)]);
    assert_eq!(ast.count_kind(module, AstKind::Concat), 0);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn aggregate_without_layout_falls_back_to_concat() {
    let mut g = ObjectGraph::new();
    let v = g.build(ObjectKind::Variable).name("v").id();
    let one = g.int_const(1);
    let two = g.int_const(2);
    let pattern = g.operation(OpType::AssignmentPattern, &[one, two]);
    let target = g.ref_obj("v", Some(v));
    let assign = g
        .build(ObjectKind::ContAssign)
        .handle(Relation::Lhs, target)
        .handle(Relation::Rhs, pattern)
        .id();
    let m = module_def(&mut g, "m");
    g.edit(m)
        .child(Relation::Variables, v)
        .child(Relation::ContAssign, assign);
    let d = design(&mut g, &[m], &[]);

    let (out, sink) = run(&g, d);
    let ast = &out.forest.ast;
    let module = out.forest.definition("\\m").unwrap();
    let assigns = children_of_kind(ast, module, AstKind::Assign);
    assert_eq!(assigns.len(), 1);
    let concat = ast.children(assigns[0])[1];
    assert_eq!(ast.kind(concat), AstKind::Concat);
    let values: Vec<_> = ast
        .children(concat)
        .iter()
        .map(|&c| const_value(ast, c))
        .collect();
    assert_eq!(values, [Some(2), Some(1)]);
    let diags = sink.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, uhdm_translate::errors::N303);
}

#[test]
fn cyclic_port_and_container_resolve_to_one_node() {
    let mut g = ObjectGraph::new();
    let m = module_def(&mut g, "m");
    let n = g.build(ObjectKind::Net).name("n").handle(Relation::Parent, m).id();
    let low = g.ref_obj("n", Some(n));
    let p = g
        .build(ObjectKind::Port)
        .name("n")
        .prop(Property::Direction, Direction::Input.code())
        .handle(Relation::LowConn, low)
        .handle(Relation::Parent, m)
        .id();
    // Reachable only through its port.
    let hidden = g.build(ObjectKind::Net).name("h").handle(Relation::Parent, m).id();
    let q = g
        .build(ObjectKind::Port)
        .name("h")
        .prop(Property::Direction, Direction::Output.code())
        .handle(Relation::LowConn, hidden)
        .id();
    g.edit(m)
        .child(Relation::Net, n)
        .child(Relation::Port, p)
        .child(Relation::Port, q);
    let d = design(&mut g, &[m], &[]);

    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    t.translate_design(d).unwrap();
    let reg = t.registry();
    assert_eq!(reg.memo(p), reg.memo(n));
    assert_eq!(reg.memo(q), reg.memo(hidden));
    assert_eq!(reg.memo(m), reg.template("\\m"));

    let ast = t.ast();
    let module = reg.template("\\m").unwrap();
    let wires = children_of_kind(ast, module, AstKind::Wire);
    assert_eq!(names(ast, &wires), ["\\n", "\\h"]);
    assert!(ast.get(wires[0]).flags.is_input);
    assert!(ast.get(wires[1]).flags.is_output);
    assert_eq!(ast.get(wires[0]).port_id, 1);
    assert_eq!(ast.get(wires[1]).port_id, 2);
}

#[test]
fn cycles_through_passthrough_rewrites_terminate() {
    let mut g = ObjectGraph::new();
    let outer = g.operation(OpType::Cast, &[]);
    let inner = g.operation(OpType::Cast, &[outer]);
    g.push(outer, Relation::Operand, inner);

    let x = g.ref_obj("x", None);
    let one = g.int_const(1);
    let inside = g.operation(OpType::Inside, &[x, one]);
    let pattern = g
        .build(ObjectKind::TaggedPattern)
        .name("f")
        .handle(Relation::Pattern, inside)
        .id();
    g.push(inside, Relation::Operand, pattern);

    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    assert_eq!(t.translate_object(outer).unwrap(), None);

    let root = t.translate_object(pattern).unwrap().unwrap();
    let ast = t.ast();
    assert_eq!(ast.kind(root), AstKind::LogicOr);
    assert_eq!(ast.count_kind(root, AstKind::Eq), 2);
    assert_eq!(t.registry().memo(inside), Some(root));
}

#[test]
fn loop_variable_is_hoisted_into_process() {
    let mut g = ObjectGraph::new();
    let clk = g.ref_obj("clk", None);
    let edge = g.operation(OpType::Posedge, &[clk]);
    let i = g.build(ObjectKind::Variable).name("i").id();
    let zero = g.int_const(0);
    let init = g
        .build(ObjectKind::Assignment)
        .prop(Property::Blocking, 1)
        .handle(Relation::Lhs, i)
        .handle(Relation::Rhs, zero)
        .id();
    let i_ref = g.ref_obj("i", Some(i));
    let eight = g.int_const(8);
    let cond = g.operation(OpType::Lt, &[i_ref, eight]);
    let i_ref2 = g.ref_obj("i", Some(i));
    let step = g.operation(OpType::PostInc, &[i_ref2]);
    let acc = g.ref_obj("acc", None);
    let i_ref3 = g.ref_obj("i", Some(i));
    let body = g
        .build(ObjectKind::Assignment)
        .prop(Property::Blocking, 0)
        .handle(Relation::Lhs, acc)
        .handle(Relation::Rhs, i_ref3)
        .id();
    let for_loop = g
        .build(ObjectKind::For)
        .handle(Relation::ForInitStmt, init)
        .handle(Relation::Condition, cond)
        .handle(Relation::ForIncStmt, step)
        .handle(Relation::Stmt, body)
        .id();
    let begin = g.build(ObjectKind::Begin).child(Relation::Stmt, for_loop).id();
    let ec = g
        .build(ObjectKind::EventControl)
        .handle(Relation::Condition, edge)
        .handle(Relation::Stmt, begin)
        .id();
    let always = g
        .build(ObjectKind::Always)
        .prop(Property::AlwaysType, 1)
        .handle(Relation::Stmt, ec)
        .id();
    let m = module_def(&mut g, "m");
    g.edit(m).child(Relation::Process, always);
    let d = design(&mut g, &[m], &[]);

    let (out, _) = run(&g, d);
    let ast = &out.forest.ast;
    let module = out.forest.definition("\\m").unwrap();
    let proc_node = children_of_kind(ast, module, AstKind::Always)[0];
    assert_eq!(
        child_kinds(ast, proc_node),
        [AstKind::Posedge, AstKind::Wire, AstKind::Block]
    );
    let wire = ast.children(proc_node)[1];
    assert_eq!(ast.name(wire), "\\i");
    assert!(ast.get(wire).flags.is_reg);
    let range = ast.children(wire)[0];
    let bounds: Vec<_> = ast.children(range).iter().map(|&b| const_value(ast, b)).collect();
    assert_eq!(bounds, [Some(31), Some(0)]);

    let block = ast.children(proc_node)[2];
    let for_node = ast.children(block)[0];
    assert_eq!(
        child_kinds(ast, for_node),
        [AstKind::AssignEq, AstKind::Lt, AstKind::AssignEq, AstKind::Block]
    );
}

#[test]
fn post_increment_matches_pre_increment() {
    let mut g = ObjectGraph::new();
    let a1 = g.ref_obj("a", None);
    let a2 = g.ref_obj("a", None);
    let post = g.operation(OpType::PostInc, &[a1]);
    let pre = g.operation(OpType::PreInc, &[a2]);
    let b1 = g.ref_obj("b", None);
    let b2 = g.ref_obj("b", None);
    let post_dec = g.operation(OpType::PostDec, &[b1]);
    let pre_dec = g.operation(OpType::PreDec, &[b2]);

    let sink = DiagnosticSink::new();
    let mut t = Translator::new(&g, TranslateOptions::default(), &sink);
    let post = t.translate_object(post).unwrap().unwrap();
    let pre = t.translate_object(pre).unwrap().unwrap();
    let post_dec = t.translate_object(post_dec).unwrap().unwrap();
    let pre_dec = t.translate_object(pre_dec).unwrap().unwrap();
    let ast = t.ast();
    assert!(ast.structurally_eq(post, pre));
    assert!(ast.structurally_eq(post_dec, pre_dec));

    assert_eq!(ast.kind(pre), AstKind::AssignEq);
    let rhs = ast.children(pre)[1];
    assert_eq!(ast.kind(rhs), AstKind::Add);
    assert_eq!(const_value(ast, ast.children(rhs)[1]), Some(1));
    assert_eq!(ast.kind(ast.children(pre_dec)[1]), AstKind::Sub);
}
