//! Upload-then-submit support shared by the chat and arena screens.
//!
//! Files picked by the user wait in an [`AttachmentQueue`]. On submit they are
//! uploaded one at a time; the first failed upload aborts the whole action
//! and the dependent request is never issued.

use std::future::Future;

use leptos::prelude::*;
use uuid::Uuid;

use crate::domain::a003_files::api as files_api;
use crate::shared::http::ApiResult;

/// Formats the gateway can extract text from.
pub const ACCEPTED_FILE_TYPES: &str =
    ".txt,.md,.csv,.json,.xml,.yaml,.yml,.html,.py,.js,.ts,.rs,.java,.c,.cpp,.go,.pdf,.docx";

/// Display data for one queued file.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub key: Uuid,
    pub name: String,
    pub size: u64,
}

/// Files chosen for the next submit, in pick order.
///
/// A file keeps its server id once uploaded, so retrying a failed submit
/// only uploads what is still missing.
#[derive(Debug, Clone)]
pub struct AttachmentQueue<F> {
    items: Vec<QueuedFile<F>>,
}

#[derive(Debug, Clone)]
struct QueuedFile<F> {
    entry: PendingEntry,
    file: F,
    uploaded_id: Option<i64>,
}

impl<F> Default for AttachmentQueue<F> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<F: Clone> AttachmentQueue<F> {
    pub fn push(&mut self, name: String, size: u64, file: F) -> Uuid {
        let key = Uuid::new_v4();
        self.items.push(QueuedFile {
            entry: PendingEntry { key, name, size },
            file,
            uploaded_id: None,
        });
        key
    }

    pub fn remove(&mut self, key: Uuid) {
        self.items.retain(|item| item.entry.key != key);
    }

    /// Drop the files a successful submit consumed. Files queued meanwhile stay.
    pub fn remove_all(&mut self, keys: &[Uuid]) {
        self.items.retain(|item| !keys.contains(&item.entry.key));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn entries(&self) -> Vec<PendingEntry> {
        self.items.iter().map(|item| item.entry.clone()).collect()
    }

    /// Files without a server id yet, in pick order.
    pub fn not_uploaded(&self) -> Vec<(Uuid, F)> {
        self.items
            .iter()
            .filter(|item| item.uploaded_id.is_none())
            .map(|item| (item.entry.key, item.file.clone()))
            .collect()
    }

    pub fn mark_uploaded(&mut self, key: Uuid, id: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.entry.key == key) {
            item.uploaded_id = Some(id);
        }
    }

    /// Keys and server ids of every uploaded file, in pick order.
    pub fn uploaded(&self) -> Vec<(Uuid, i64)> {
        self.items
            .iter()
            .filter_map(|item| item.uploaded_id.map(|id| (item.entry.key, id)))
            .collect()
    }
}

/// Upload each item in order, waiting for one before starting the next.
/// Stops at the first error.
pub async fn upload_sequentially<T, F, Fut>(items: Vec<T>, mut upload: F) -> ApiResult<Vec<i64>>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ApiResult<i64>>,
{
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        ids.push(upload(item).await?);
    }
    Ok(ids)
}

/// Upload the queued browser files that have no server id yet through
/// `/files/upload`. Each id is recorded in the queue as soon as it arrives.
/// Returns keys and ids of all uploaded files in the queue.
pub async fn upload_queue(
    queue: RwSignal<AttachmentQueue<web_sys::File>, LocalStorage>,
) -> ApiResult<Vec<(Uuid, i64)>> {
    let missing = queue.with_untracked(|q| q.not_uploaded());
    if !missing.is_empty() {
        log::debug!("Uploading {} attachment(s)", missing.len());
    }
    upload_sequentially(missing, |(key, file)| async move {
        files_api::upload_file(&file).await.map(|uploaded| {
            queue.update(|q| q.mark_uploaded(key, uploaded.id));
            uploaded.id
        })
    })
    .await?;
    Ok(queue.with_untracked(|q| q.uploaded()))
}

/// Move the files chosen in an `<input type="file">` into a queue.
pub fn take_input_files(
    input: &web_sys::HtmlInputElement,
    queue: &mut AttachmentQueue<web_sys::File>,
) {
    if let Some(list) = input.files() {
        for i in 0..list.length() {
            if let Some(file) = list.get(i) {
                queue.push(file.name(), file.size() as u64, file);
            }
        }
    }
    // Allow picking the same file again
    input.set_value("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::ApiError;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[test]
    fn queue_keeps_pick_order_and_removes_by_key() {
        let mut q = AttachmentQueue::default();
        let a = q.push("a.txt".into(), 10, "A");
        q.push("b.txt".into(), 20, "B");
        q.push("c.txt".into(), 30, "C");
        let files: Vec<_> = q.not_uploaded().into_iter().map(|(_, f)| f).collect();
        assert_eq!(files, vec!["A", "B", "C"]);

        q.remove(a);
        assert_eq!(q.len(), 2);
        let names: Vec<_> = q.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);

        q.clear();
        assert!(q.is_empty());
    }

    /// Mirrors `upload_queue` over a plain queue.
    fn upload_missing(
        queue: &RefCell<AttachmentQueue<&'static str>>,
        calls: &RefCell<Vec<&'static str>>,
        failing: Option<&'static str>,
    ) -> ApiResult<Vec<(Uuid, i64)>> {
        let missing = queue.borrow().not_uploaded();
        block_on(upload_sequentially(missing, |(key, file)| {
            calls.borrow_mut().push(file);
            let result = if Some(file) == failing {
                Err(ApiError::Network("connection reset".into()))
            } else {
                let id = calls.borrow().len() as i64 * 100;
                queue.borrow_mut().mark_uploaded(key, id);
                Ok(id)
            };
            async move { result }
        }))?;
        Ok(queue.borrow().uploaded())
    }

    #[test]
    fn retry_uploads_only_files_without_an_id() {
        let queue = RefCell::new(AttachmentQueue::default());
        queue.borrow_mut().push("a.txt".into(), 1, "A");
        queue.borrow_mut().push("b.txt".into(), 2, "B");
        let calls = RefCell::new(Vec::new());

        assert!(upload_missing(&queue, &calls, Some("B")).is_err());
        assert_eq!(queue.borrow().not_uploaded().len(), 1);

        let uploaded = upload_missing(&queue, &calls, None).unwrap();
        assert_eq!(*calls.borrow(), vec!["A", "B", "B"]);
        let ids: Vec<_> = uploaded.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![100, 300]);

        // A resend after the message itself failed uploads nothing new
        upload_missing(&queue, &calls, None).unwrap();
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn consumed_files_are_removed_and_new_picks_stay() {
        let mut q = AttachmentQueue::default();
        let a = q.push("a.txt".into(), 1, "A");
        q.mark_uploaded(a, 5);
        q.push("late.txt".into(), 1, "L");

        let keys: Vec<_> = q.uploaded().into_iter().map(|(key, _)| key).collect();
        q.remove_all(&keys);
        let names: Vec<_> = q.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["late.txt"]);
    }

    #[test]
    fn uploads_run_in_order() {
        let calls = RefCell::new(Vec::new());
        let ids = block_on(upload_sequentially(vec![3, 1, 2], |n| {
            calls.borrow_mut().push(n);
            async move { Ok(n * 10) }
        }))
        .unwrap();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(*calls.borrow(), vec![3, 1, 2]);
    }

    #[test]
    fn first_failure_aborts_remaining_uploads() {
        let calls = RefCell::new(Vec::new());
        let result = block_on(upload_sequentially(vec![1, 2, 3], |n| {
            calls.borrow_mut().push(n);
            async move {
                if n == 2 {
                    Err(ApiError::Api {
                        status: 400,
                        message: "File type not allowed".into(),
                    })
                } else {
                    Ok(n)
                }
            }
        }));
        assert_eq!(
            result,
            Err(ApiError::Api {
                status: 400,
                message: "File type not allowed".into()
            })
        );
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn nothing_to_upload() {
        let ids = block_on(upload_sequentially(Vec::<u8>::new(), |_| async { Ok(1) })).unwrap();
        assert!(ids.is_empty());
    }
}
