use parish_data::prelude::*;
use tokio::runtime::Runtime;

async fn test_users_context() -> Result<DataContext, DataAccessError> {
    let mut ctx = DataContext::connect(&DataConfig::memory()).await?;
    let mut bp = Blueprint::create("test_users");
    bp.id();
    bp.string("name", 255);
    bp.string("email", 255).unique();
    bp.integer("age").nullable();
    bp.soft_deletes();
    for statement in bp.compile()? {
        ctx.execute_batch(&statement).await?;
    }
    Ok(ctx)
}

#[test]
fn insert_then_get_where_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;

        let inserted = ctx
            .insert(
                "test_users",
                &[
                    ("name", Value::from("Test User 3")),
                    ("email", Value::from("test3@example.com")),
                    ("age", Value::Int(25)),
                ],
            )
            .await?;
        let id = *inserted.get("id").unwrap().as_int().unwrap();
        assert!(id > 0);
        assert_eq!(inserted.get("name").unwrap().as_text(), Some("Test User 3"));

        let rows = ctx
            .get_where("test_users", &Conditions::new().eq("id", id))
            .await?;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("name").unwrap().as_text(), Some("Test User 3"));
        assert_eq!(row.get("email").unwrap().as_text(), Some("test3@example.com"));
        assert_eq!(row.get("age").unwrap().as_int(), Some(&25));
        // defaults fill in for columns the insert omitted
        assert_eq!(row.get("deleted").unwrap().as_bool(), Some(&false));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn update_scenario_returns_affected_and_new_values() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;

        let inserted = ctx
            .insert(
                "test_users",
                &[
                    ("name", Value::from("Test User 3")),
                    ("email", Value::from("test3@example.com")),
                    ("age", Value::Int(25)),
                ],
            )
            .await?;
        let id = inserted.get("id").unwrap().clone();

        let affected = ctx
            .update(
                "test_users",
                &[
                    ("age", Value::Int(26)),
                    ("name", Value::from("Test User 3 Updated")),
                ],
                &Conditions::new().eq("id", id.clone()),
            )
            .await?;
        assert_eq!(affected, 1);

        let rows = ctx
            .get_where("test_users", &Conditions::new().eq("id", id))
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("age").unwrap().as_int(), Some(&26));
        assert_eq!(
            rows[0].get("name").unwrap().as_text(),
            Some("Test User 3 Updated")
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn no_match_reads_are_empty_not_errors() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;
        let conds = Conditions::new().eq("email", "nobody@example.com");
        assert!(ctx.get_where("test_users", &conds).await?.is_empty());
        assert!(!ctx.exists("test_users", &conds).await?);
        assert_eq!(ctx.count("test_users", Some(&conds)).await?, 0);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn get_all_pages_and_validates_offset() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;
        for i in 0..5 {
            ctx.insert(
                "test_users",
                &[
                    ("name", Value::from(format!("user {i}"))),
                    ("email", Value::from(format!("user{i}@example.com"))),
                ],
            )
            .await?;
        }

        assert_eq!(ctx.get_all("test_users", None, None).await?.len(), 5);
        let page = ctx.get_all("test_users", Some(2), Some(2)).await?;
        assert_eq!(page.len(), 2);

        let err = ctx.get_all("test_users", None, Some(2)).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidInput(_)));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn unconditional_mutations_are_refused_without_side_effects()
-> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;
        ctx.insert(
            "test_users",
            &[("name", Value::from("a")), ("email", Value::from("a@x.com"))],
        )
        .await?;

        let empty = Conditions::new();
        let update_err = ctx
            .update("test_users", &[("name", Value::from("b"))], &empty)
            .await
            .unwrap_err();
        assert!(matches!(update_err, DataAccessError::InvalidInput(_)));

        let delete_err = ctx.delete("test_users", &empty).await.unwrap_err();
        assert!(matches!(delete_err, DataAccessError::InvalidInput(_)));

        // nothing was mutated
        let rows = ctx.get_all("test_users", None, None).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name").unwrap().as_text(), Some("a"));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn constraint_violations_surface_as_query_errors() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;
        let row = [
            ("name", Value::from("dup")),
            ("email", Value::from("dup@example.com")),
        ];
        ctx.insert("test_users", &row).await?;
        let err = ctx.insert("test_users", &row).await.unwrap_err();
        assert!(matches!(err, DataAccessError::Query(_)));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn empty_insert_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut ctx = test_users_context().await?;
        let err = ctx.insert("test_users", &[]).await.unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidInput(_)));
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
