use parish_data::prelude::*;
use tokio::runtime::Runtime;

async fn seeded_context() -> Result<DataContext, DataAccessError> {
    let mut ctx = DataContext::connect(&DataConfig::memory()).await?;
    let mut bp = Blueprint::create("test_users");
    bp.id();
    bp.string("name", 255);
    bp.integer("age");
    bp.soft_deletes();
    for statement in bp.compile()? {
        ctx.execute_batch(&statement).await?;
    }
    for (name, age) in [("pair one", 25), ("pair two", 25), ("odd one", 40)] {
        ctx.insert(
            "test_users",
            &[("name", Value::from(name)), ("age", Value::Int(age))],
        )
        .await?;
    }
    Ok(ctx)
}

#[test]
fn self_join_pairs_rows_sharing_an_age() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = seeded_context().await?;

        let joins = vec![JoinClause::inner(
            "test_users u2",
            "u2.age = u1.age AND u2.id != u1.id",
        )];
        let conditions = Conditions::new().param("u1.age", ":age");
        let rows = ctx
            .select_with_join(
                "test_users u1",
                &joins,
                &["u1.id AS left_id", "u2.id AS right_id", "u1.age AS age"],
                &conditions,
                &[("age", Value::Int(25))],
            )
            .await?;

        // both orderings of the 25-year-old pair come back; the 40-year-old
        // has no partner
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.get("age").unwrap().as_int(), Some(&25));
            assert_ne!(
                row.get("left_id").unwrap().as_int(),
                row.get("right_id").unwrap().as_int()
            );
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn left_join_keeps_unmatched_base_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = seeded_context().await?;
        let mut bp = Blueprint::create("visits");
        bp.id();
        bp.integer("user_id");
        bp.string("kind", 32);
        for statement in bp.compile()? {
            ctx.execute_batch(&statement).await?;
        }
        ctx.insert("visits", &[("user_id", Value::Int(1)), ("kind", Value::from("home"))])
            .await?;

        let joins = vec![JoinClause::left("visits v", "v.user_id = u1.id")];
        let rows = ctx
            .select_with_join(
                "test_users u1",
                &joins,
                &["u1.id AS user_id", "v.kind AS kind"],
                &Conditions::new(),
                &[],
            )
            .await?;
        // LEFT JOIN keeps users without visits, with NULL on the right side
        assert_eq!(rows.len(), 3);
        let without_visit = rows
            .iter()
            .filter(|row| row.get("kind").unwrap().is_null())
            .count();
        assert_eq!(without_visit, 2);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn named_params_bind_into_condition_values() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = seeded_context().await?;
        // literal condition values and named placeholders mix in one query
        let conditions = Conditions::new()
            .eq("u1.name", "pair one")
            .param("u1.age >=", ":min_age");
        let rows = ctx
            .select_with_join(
                "test_users u1",
                &[],
                &["u1.id", "u1.name"],
                &conditions,
                &[("min_age", Value::Int(20))],
            )
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name").unwrap().as_text(), Some("pair one"));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn caller_placeholder_names_never_clash_with_literal_binds()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = seeded_context().await?;
        // a caller placeholder named `w0` alongside a literal condition value
        let conditions = Conditions::new()
            .eq("u1.name", "odd one")
            .param("u1.age", ":w0");
        let rows = ctx
            .select_with_join(
                "test_users u1",
                &[],
                &["u1.id", "u1.name", "u1.age"],
                &conditions,
                &[("w0", Value::Int(40))],
            )
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name").unwrap().as_text(), Some("odd one"));
        assert_eq!(rows[0].get("age").unwrap().as_int(), Some(&40));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
