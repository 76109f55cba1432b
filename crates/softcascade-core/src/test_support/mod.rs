//! Test-only entity fixtures.
//!
//! Blog fixtures (`Author`, `Post`, `Comment`, `PostType`) plus deliberately
//! misconfigured posts, a board with a hard-deleting relation, and a
//! self-referencing `Node` for cycle checks.

use crate::{
    cascade::{CascadeBehavior, CascadePolicy},
    memory::MemoryHost,
    model::{
        accessor::AccessorModel,
        entity::{CascadeRelations, EntityModel, SoftDeleteModel},
        relation::RelationModel,
    },
    traits::{EntityKind, Path},
    types::{RecordKey, Timestamp},
};
use std::rc::Rc;
use ulid::Ulid;

///
/// Macro
///

macro_rules! test_entity {
    (
        $ty:ident,
        name: $name:literal,
        soft_delete: $soft:expr,
        accessors: [$($accessor:expr),* $(,)?],
        cascade: $cascade:expr $(,)?
    ) => {
        pub struct $ty;

        impl Path for $ty {
            const PATH: &'static str = concat!("softcascade_core::test_support::", stringify!($ty));
        }

        impl EntityKind for $ty {
            const MODEL: &'static EntityModel = &EntityModel {
                path: <$ty as Path>::PATH,
                entity_name: $name,
                soft_delete: $soft,
                accessors: &[$($accessor),*],
                cascade: $cascade,
            };
        }
    };
}

const SOFT: Option<SoftDeleteModel> = Some(SoftDeleteModel::DEFAULT);

test_entity!(
    Author,
    name: "author",
    soft_delete: SOFT,
    accessors: [
        AccessorModel::relation("posts", RelationModel::has_many(Post::PATH)),
        AccessorModel::relation(
            "posttypes",
            RelationModel::belongs_to_many(PostType::PATH, "authors__post_types"),
        ),
        AccessorModel::value("name"),
    ],
    cascade: CascadeRelations::Many(&["posts", "posttypes"]),
);

test_entity!(
    Post,
    name: "post",
    soft_delete: SOFT,
    accessors: [
        AccessorModel::relation("comments", RelationModel::has_many(Comment::PATH)),
        AccessorModel::relation("postType", RelationModel::has_one(PostType::PATH)),
    ],
    cascade: CascadeRelations::Many(&["comments", "postType"]),
);

test_entity!(
    Comment,
    name: "comment",
    soft_delete: SOFT,
    accessors: [],
    cascade: CascadeRelations::None,
);

test_entity!(
    PostType,
    name: "post_type",
    soft_delete: SOFT,
    accessors: [],
    cascade: CascadeRelations::None,
);

test_entity!(
    InvalidRelationshipPost,
    name: "invalid_relationship_post",
    soft_delete: SOFT,
    accessors: [
        AccessorModel::relation("comments", RelationModel::has_many(Comment::PATH)),
        AccessorModel::value("invalidRelationship"),
        AccessorModel::value("anotherInvalidRelationship"),
    ],
    cascade: CascadeRelations::Many(&[
        "comments",
        "invalidRelationship",
        "anotherInvalidRelationship",
    ]),
);

test_entity!(
    NonSoftDeletingPost,
    name: "non_soft_deleting_post",
    soft_delete: None,
    accessors: [AccessorModel::relation("comments", RelationModel::has_many(Comment::PATH))],
    cascade: CascadeRelations::One("comments"),
);

test_entity!(
    PostWithMissingRelationshipMethod,
    name: "post_with_missing_relationship_method",
    soft_delete: SOFT,
    accessors: [],
    cascade: CascadeRelations::One("comments"),
);

test_entity!(
    Board,
    name: "board",
    soft_delete: SOFT,
    accessors: [
        AccessorModel::relation("pins", RelationModel::has_many(Pin::PATH)),
        AccessorModel::relation("stickers", RelationModel::has_many(Sticker::PATH)),
    ],
    cascade: CascadeRelations::Many(&["pins", "stickers"]),
);

test_entity!(
    Pin,
    name: "pin",
    soft_delete: SOFT,
    accessors: [],
    cascade: CascadeRelations::None,
);

test_entity!(
    Sticker,
    name: "sticker",
    soft_delete: None,
    accessors: [],
    cascade: CascadeRelations::None,
);

test_entity!(
    Node,
    name: "node",
    soft_delete: SOFT,
    accessors: [AccessorModel::relation("children", RelationModel::has_many(Node::PATH))],
    cascade: CascadeRelations::One("children"),
);

/// Record key for a fixture entity with a small numeric id.
#[must_use]
pub fn key<E: EntityKind>(id: u128) -> RecordKey {
    RecordKey::of::<E>(Ulid::from(id))
}

/// Parse an RFC 3339 fixture timestamp.
#[must_use]
pub fn at(s: &str) -> Timestamp {
    Timestamp::parse_rfc3339(s).expect("fixture timestamp")
}

/// Host with every fixture model registered and the behavior attached to
/// each entity that declares cascades.
#[must_use]
pub fn blog_host(policy: CascadePolicy) -> (MemoryHost, Rc<CascadeBehavior>) {
    let mut host = MemoryHost::new();
    host.register::<Author>()
        .register::<Post>()
        .register::<Comment>()
        .register::<PostType>()
        .register::<InvalidRelationshipPost>()
        .register::<NonSoftDeletingPost>()
        .register::<PostWithMissingRelationshipMethod>()
        .register::<Board>()
        .register::<Pin>()
        .register::<Sticker>()
        .register::<Node>();

    let behavior = CascadeBehavior::shared(policy);
    let hooks = host.hooks_mut();
    behavior.register::<Author>(hooks);
    behavior.register::<Post>(hooks);
    behavior.register::<InvalidRelationshipPost>(hooks);
    behavior.register::<NonSoftDeletingPost>(hooks);
    behavior.register::<PostWithMissingRelationshipMethod>(hooks);
    behavior.register::<Board>(hooks);
    behavior.register::<Node>(hooks);

    (host, behavior)
}
