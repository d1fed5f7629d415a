/*
 *  Copyright 2025-2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Structured event types for deposit operations.
//!
//! Services and the store tag their `tracing` events with an `event_type`
//! field taken from here so log pipelines can filter on a stable name.

/// Draft created on first save.
pub const DRAFT_CREATED: &str = "draft.created";
/// Existing draft saved.
pub const DRAFT_SAVED: &str = "draft.saved";
/// Draft save rejected or failed.
pub const DRAFT_SAVE_FAILED: &str = "draft.save_failed";
/// Draft published.
pub const DRAFT_PUBLISHED: &str = "draft.published";
/// Publish refused or failed.
pub const DRAFT_PUBLISH_FAILED: &str = "draft.publish_failed";
/// Draft discarded.
pub const DRAFT_DELETED: &str = "draft.deleted";
/// Draft delete failed.
pub const DRAFT_DELETE_FAILED: &str = "draft.delete_failed";

/// Upload waiting for a free slot.
pub const FILE_UPLOAD_QUEUED: &str = "file.upload.queued";
/// Upload holding a slot and transferring.
pub const FILE_UPLOAD_STARTED: &str = "file.upload.started";
/// Upload committed.
pub const FILE_UPLOAD_FINISHED: &str = "file.upload.finished";
/// Upload failed at any of its steps.
pub const FILE_UPLOAD_FAILED: &str = "file.upload.failed";
/// File removed from the draft.
pub const FILE_DELETED: &str = "file.deleted";
/// File delete failed.
pub const FILE_DELETE_FAILED: &str = "file.delete_failed";
/// Upload queue stopped taking files.
pub const FILE_UPLOAD_QUEUE_CLOSED: &str = "file.upload.queue_closed";

/// Selected community changed.
pub const COMMUNITY_CHANGED: &str = "community.changed";
