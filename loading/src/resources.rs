//! Folder handles kept alive while content loads

use bevy::{asset::LoadedFolder, prelude::*};

#[derive(Debug, Resource)]
pub(super) struct WeaponsFolderHandle(pub Handle<LoadedFolder>);

#[derive(Debug, Resource)]
pub(super) struct AbilitiesFolderHandle(pub Handle<LoadedFolder>);
