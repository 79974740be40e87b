use super::*;

/// Tests paging through users ordered by name.
///
/// Expected: total counts every user, pages hold at most `per_page` users in name order
#[tokio::test]
async fn pages_users_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Charlie", "Alice", "Bravo"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let (first_page, total) = repo.get_all_paginated(0, 2).await?;
    let (second_page, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].name, "Alice");
    assert_eq!(first_page[1].name, "Bravo");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "Charlie");

    Ok(())
}
