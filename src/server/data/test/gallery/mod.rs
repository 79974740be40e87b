use crate::server::{
    data::gallery::{
        GalleryCommentRepository, GalleryFavoriteRepository, GalleryItemRepository,
        GalleryVoteRepository,
    },
    model::gallery::{CreateGalleryItemParam, GallerySort, ListGalleryItemsParam},
};
use entity::{gallery_item::GalleryStatus, gallery_vote::VoteType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod comment;
mod favorite;
mod item;
mod vote;

fn list_param(sort: GallerySort) -> ListGalleryItemsParam {
    ListGalleryItemsParam {
        status: GalleryStatus::Approved,
        category: None,
        sort,
        page: 0,
        per_page: 10,
    }
}
