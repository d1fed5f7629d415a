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

use deposit_form::services::UploadProgressNotifier;
use parking_lot::Mutex;

/// Records every progress tick in arrival order.
#[derive(Debug, Default)]
pub struct RecordingProgressNotifier {
    events: Mutex<Vec<(String, u8)>>,
}

impl RecordingProgressNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, u8)> {
        self.events.lock().clone()
    }

    /// Ticks for one file, in order.
    pub fn for_key(&self, key: &str) -> Vec<u8> {
        self.events
            .lock()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, percent)| *percent)
            .collect()
    }

    pub fn last(&self, key: &str) -> Option<u8> {
        self.for_key(key).last().copied()
    }
}

impl UploadProgressNotifier for RecordingProgressNotifier {
    fn on_upload_progress(&self, key: &str, percent: u8) {
        self.events.lock().push((key.to_string(), percent));
    }
}
