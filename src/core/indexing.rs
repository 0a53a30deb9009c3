use crate::domain::ports::InsertHandle;

/// Stores an item, then points each of its tags at it. A rejected item
/// leaves the tag index untouched.
pub async fn insert_and_index_item<Tag, ItemRef, Item, DbError>(
    handler: &impl InsertHandle<Tag, ItemRef, Item, DbError>,
    item_ref: ItemRef,
    item: Item,
    tags: Vec<Tag>,
) -> Result<(), DbError>
where
    ItemRef: Clone,
    Tag: Clone,
{
    handler.insert_item(item).await?;
    handler.insert_tags(tags, item_ref).await
}
