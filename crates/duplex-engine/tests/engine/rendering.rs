use duplex_engine::{TemplateError, compile};
use model::params;

#[test]
fn test_taken_branch_renders_between_markers() {
    let template = compile(
        "select * from emp where 1=1/*IF active*/ and active = /*flag*/true/*END*/ order by emp_no",
        &["active", "flag"],
    )
    .unwrap();

    let sql = template
        .render(&params! { "active" => true, "flag" => false })
        .unwrap();
    assert_eq!(
        sql,
        "select * from emp where 1=1 and active = :p1 order by emp_no"
    );
}

#[test]
fn test_untaken_branch_renders_nothing() {
    let template = compile(
        "select * from emp where 1=1/*IF active*/ and active = /*flag*/true/*END*/ order by emp_no",
        &["active", "flag"],
    )
    .unwrap();

    let sql = template.render(&params! { "active" => false }).unwrap();
    assert_eq!(sql, "select * from emp where 1=1 order by emp_no");
}

#[test]
fn test_bare_default_dropped_from_output() {
    let template = compile("where id = /*user_id*/42", &["user_id"]).unwrap();
    let sql = template.render(&params! { "user_id" => 7 }).unwrap();
    assert_eq!(sql, "where id = :p1");
}

#[test]
fn test_parenthesized_default_dropped_from_output() {
    let template = compile("where id in /*ids*/(10, 20) and x = 1", &["ids"]).unwrap();
    let sql = template.render(&params! { "ids" => 1 }).unwrap();
    assert_eq!(sql, "where id in :p1 and x = 1");
}

#[test]
fn test_quoted_default_dropped_from_output() {
    let template = compile("where name = /*name*/'anon'", &["name"]).unwrap();
    let sql = template.render(&params! { "name" => "ann" }).unwrap();
    assert_eq!(sql, "where name = :p1");
}

#[test]
fn test_first_true_arm_wins() {
    let source = "select * from t where /*IF rank == 1*/tier = 'gold'\
                  /*ELSEIF rank == 2*/tier = 'silver'\
                  /*ELSE*/tier = 'bronze'/*END*/";
    let template = compile(source, &["rank"]).unwrap();

    let gold = template.render(&params! { "rank" => 1 }).unwrap();
    assert_eq!(gold, "select * from t where tier = 'gold'");

    let silver = template.render(&params! { "rank" => 2 }).unwrap();
    assert_eq!(silver, "select * from t where tier = 'silver'");

    let bronze = template.render(&params! { "rank" => 9 }).unwrap();
    assert_eq!(bronze, "select * from t where tier = 'bronze'");
}

#[test]
fn test_nested_block_renders_only_inside_taken_outer() {
    let source = "select 1/*IF a*/ A/*IF b*/ B/*END*//*END*/";
    let template = compile(source, &["a", "b"]).unwrap();

    let both = template
        .render(&params! { "a" => true, "b" => true })
        .unwrap();
    assert_eq!(both, "select 1 A B");

    let outer_only = template
        .render(&params! { "a" => true, "b" => false })
        .unwrap();
    assert_eq!(outer_only, "select 1 A");

    let neither = template
        .render(&params! { "a" => false, "b" => true })
        .unwrap();
    assert_eq!(neither, "select 1");
}

#[test]
fn test_three_level_nesting_renders_per_level() {
    let source = "t/*IF a*/ a/*IF b*/ b/*IF c*/ c = /*x*/0/*END*//*END*//*END*/";
    let template = compile(source, &["a", "b", "c", "x"]).unwrap();

    let all = template
        .render(&params! { "a" => true, "b" => true, "c" => true, "x" => 9 })
        .unwrap();
    assert_eq!(all, "t a b c = :p1");

    let inner_off = template
        .render(&params! { "a" => true, "b" => true, "c" => false })
        .unwrap();
    assert_eq!(inner_off, "t a b");

    let middle_off = template
        .render(&params! { "a" => true, "b" => false, "c" => true })
        .unwrap();
    assert_eq!(middle_off, "t a");

    let outer_off = template
        .render(&params! { "a" => false, "b" => true, "c" => true })
        .unwrap();
    assert_eq!(outer_off, "t");
}

#[test]
fn test_rendering_is_idempotent() {
    let template = compile(
        "select * from emp/*IF dept != null*/ where deptno = /*dept*/10/*END*/",
        &["dept"],
    )
    .unwrap();
    let args = params! { "dept" => 30 };

    let first = template.render(&args).unwrap();
    let second = template.render(&args).unwrap();
    assert_eq!(first, second);

    let prepared_first = template.prepare(&args).unwrap();
    let prepared_second = template.prepare(&args).unwrap();
    assert_eq!(prepared_first, prepared_second);
}

#[test]
fn test_plain_comments_and_quoted_lookalikes_pass_through() {
    let source = "/* hint */ select '/*not_me*/' from t where x = /*x*/0";
    let template = compile(source, &["x"]).unwrap();

    let sql = template.render(&params! { "x" => 5 }).unwrap();
    assert_eq!(sql, "/* hint */ select '/*not_me*/' from t where x = :p1");
    assert_eq!(template.slot_names(), ["p1"]);
}

#[test]
fn test_multiline_static_text_preserved_verbatim() {
    let source = "select *\nfrom emp\nwhere id = /*id*/1\n";
    let template = compile(source, &["id"]).unwrap();

    let sql = template.render(&params! { "id" => 3 }).unwrap();
    assert_eq!(sql, "select *\nfrom emp\nwhere id = :p1\n");
}

#[test]
fn test_condition_error_carries_condition_text() {
    let template = compile("x/*IF 1 / 0 == 1*/y/*END*/", &[]).unwrap();

    let err = template.render(&params! {}).unwrap_err();
    match err {
        TemplateError::ConditionEvaluation { expr_text, .. } => {
            assert_eq!(expr_text, "1 / 0 == 1");
        }
        other => panic!("expected condition error, got {other:?}"),
    }
}

#[test]
fn test_empty_string_argument_is_falsy() {
    let source = "select 1/*IF name*/ where n = /*name*/''/*END*/";
    let template = compile(source, &["name"]).unwrap();

    let skipped = template.render(&params! { "name" => "" }).unwrap();
    assert_eq!(skipped, "select 1");

    let taken = template.render(&params! { "name" => "ann" }).unwrap();
    assert_eq!(taken, "select 1 where n = :p1");
}

#[test]
fn test_function_call_in_condition() {
    let source = "select 1/*IF length(code) == 3*/ and code = /*code*/'abc'/*END*/";
    let template = compile(source, &["code"]).unwrap();

    let taken = template.render(&params! { "code" => "xyz" }).unwrap();
    assert_eq!(taken, "select 1 and code = :p1");

    let skipped = template.render(&params! { "code" => "xy" }).unwrap();
    assert_eq!(skipped, "select 1");
}
