use crate::domain::model::{CombinePlan, CombineSettings, Outcome};
use crate::domain::ports::{PlanDescription, Storage, Tool};
use crate::utils::error::{Result, ToolboxError};
use crate::utils::validation;
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

const TOOL_NAME: &str = "combine";

// 可由頁面樹繼承的頁面屬性
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// 去掉 `.` 元件，讓 `./a.pdf` 與 `a.pdf` 視為同一路徑
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// 產生只有一頁、單行文字的 PDF
pub fn sample_pdf(text: &str) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 16.into()]),
            Operation::new("Td", vec![72.into(), 770.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// 沿著 Parent 鏈找出頁面繼承的屬性
fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    // 防止損壞的頁面樹形成循環
    let mut depth = 0;
    while let Some(parent_id) = parent {
        if depth > 64 {
            return None;
        }
        let node = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
    None
}

/// 依序收集頁面，並把繼承屬性直接寫進頁面字典
fn collect_pages(doc: &Document) -> Vec<(ObjectId, Object)> {
    doc.get_pages()
        .into_values()
        .filter_map(|page_id| {
            let page = doc.get_dictionary(page_id).ok()?;
            let mut page = page.clone();
            for key in INHERITABLE_KEYS {
                if !page.has(key) {
                    if let Some(value) = inherited_attribute(doc, &page, key) {
                        page.set(key.to_vec(), value);
                    }
                }
            }
            Some((page_id, Object::Dictionary(page)))
        })
        .collect()
}

/// 合併多份文件，頁面順序為文件順序再接各自的頁序
pub fn merge_documents(documents: Vec<(String, Document)>) -> Result<Document> {
    let mut max_id = 1;
    let mut pages: Vec<(ObjectId, Object)> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;

    for (name, mut doc) in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let doc_pages = collect_pages(&doc);
        if doc_pages.is_empty() {
            return Err(ToolboxError::InvalidPdf {
                path: name,
                reason: "document has no pages".to_string(),
            });
        }

        let mut has_catalog = false;
        let mut has_pages = false;
        for (object_id, object) in doc.objects {
            match object.type_name().unwrap_or("") {
                "Catalog" => {
                    has_catalog = true;
                    if catalog_object.is_none() {
                        catalog_object = Some((object_id, object));
                    }
                }
                "Pages" => {
                    has_pages = true;
                    if let Ok(dictionary) = object.as_dict() {
                        let mut dictionary = dictionary.clone();
                        if let Some((_, ref existing)) = pages_object {
                            if let Ok(existing) = existing.as_dict() {
                                dictionary.extend(existing);
                            }
                        }
                        let id = pages_object.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                        pages_object = Some((id, Object::Dictionary(dictionary)));
                    }
                }
                "Page" | "Outlines" | "Outline" => {}
                _ => {
                    objects.insert(object_id, object);
                }
            }
        }

        if !has_catalog || !has_pages {
            return Err(ToolboxError::InvalidPdf {
                path: name,
                reason: "missing document catalog or page tree".to_string(),
            });
        }
        pages.extend(doc_pages);
    }

    let (pages_id, pages_root) = pages_object.ok_or_else(|| ToolboxError::ProcessingError {
        message: "no page tree found in any input".to_string(),
    })?;
    let (catalog_id, catalog) = catalog_object.ok_or_else(|| ToolboxError::ProcessingError {
        message: "no catalog found in any input".to_string(),
    })?;

    let mut document = Document::with_version("1.5");
    document.objects = objects;

    for (object_id, object) in &pages {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", pages_id);
            document
                .objects
                .insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    let mut root = pages_root.as_dict()?.clone();
    root.remove(b"Parent");
    root.set("Count", pages.len() as u32);
    root.set(
        "Kids",
        pages
            .iter()
            .map(|(object_id, _)| Object::Reference(*object_id))
            .collect::<Vec<_>>(),
    );
    document.objects.insert(pages_id, Object::Dictionary(root));

    let mut catalog = catalog.as_dict()?.clone();
    catalog.set("Pages", pages_id);
    catalog.remove(b"Outlines");
    document.objects.insert(catalog_id, Object::Dictionary(catalog));

    document.trailer.set("Root", catalog_id);
    document.max_id = document.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
    document.renumber_objects();

    Ok(document)
}

impl PlanDescription for CombinePlan {
    fn item_count(&self) -> usize {
        self.inputs.len()
    }

    fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .inputs
            .iter()
            .map(|input| format!("Would add '{}'", input.display()))
            .collect();
        lines.push(format!(
            "Would combine {} file(s) -> '{}'",
            self.inputs.len(),
            self.output.display()
        ));
        lines
    }
}

pub struct CombineTool<S: Storage> {
    storage: S,
    settings: CombineSettings,
}

impl<S: Storage> CombineTool<S> {
    pub fn new(storage: S, settings: CombineSettings) -> Self {
        Self { storage, settings }
    }

    async fn expand_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut expanded = Vec::new();
        for input in &self.settings.inputs {
            if self.storage.is_dir(input).await? {
                let found: Vec<PathBuf> = self
                    .storage
                    .list_dir(input)
                    .await?
                    .into_iter()
                    .filter(|entry| entry.is_file)
                    .map(|entry| input.join(entry.name))
                    .filter(|path| validation::has_extension(path, &["pdf"]))
                    .collect();
                tracing::debug!(
                    "Found {} PDF file(s) in '{}'",
                    found.len(),
                    input.display()
                );
                expanded.extend(found);
            } else {
                validation::validate_file_extensions("inputs", &[input], &["pdf"])?;
                expanded.push(input.clone());
            }
        }
        Ok(expanded)
    }
}

#[async_trait]
impl<S: Storage> Tool for CombineTool<S> {
    type Plan = CombinePlan;

    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    async fn plan(&self) -> Result<CombinePlan> {
        let inputs = self.expand_inputs().await?;
        if inputs.is_empty() {
            return Err(ToolboxError::ValidationError {
                message: "no PDF files found in the given inputs".to_string(),
            });
        }

        let output = self.settings.output.clone();
        let normalized_output = normalize(&output);
        if inputs.iter().any(|input| normalize(input) == normalized_output) {
            return Err(ToolboxError::ValidationError {
                message: format!("output '{}' is also an input", output.display()),
            });
        }
        if !self.settings.overwrite && self.storage.exists(&output).await? {
            return Err(ToolboxError::NameConflict {
                target: output.display().to_string(),
                reason: "output file already exists".to_string(),
            });
        }

        Ok(CombinePlan { inputs, output })
    }

    async fn apply(&self, plan: CombinePlan) -> Result<Outcome> {
        let mut documents = Vec::with_capacity(plan.inputs.len());
        let mut lines = Vec::with_capacity(plan.inputs.len() + 1);
        let mut total_pages = 0;

        for input in &plan.inputs {
            let name = input.display().to_string();
            let data = self.storage.read_file(input).await?;
            let document = Document::load_mem(&data).map_err(|e| ToolboxError::InvalidPdf {
                path: name.clone(),
                reason: e.to_string(),
            })?;
            let page_count = document.get_pages().len();
            tracing::debug!("Loaded '{}' with {} page(s)", name, page_count);
            total_pages += page_count;
            lines.push(format!("Added '{}' ({} page(s))", name, page_count));
            documents.push((name, document));
        }

        let mut merged = merge_documents(documents)?;
        let mut buffer = Vec::new();
        merged.save_to(&mut buffer)?;
        self.storage.write_file(&plan.output, &buffer).await?;
        tracing::debug!("Wrote {} bytes to '{}'", buffer.len(), plan.output.display());

        lines.push(format!(
            "Combined {} file(s), {} page(s) -> '{}'",
            plan.inputs.len(),
            total_pages,
            plan.output.display()
        ));
        Ok(Outcome::new(TOOL_NAME, lines).with_artifact(plan.output))
    }
}
