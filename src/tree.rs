//! The resolved directory, held as a flat arena.
//!
//! ```text
//! Tree
//!  - folders:  [services, Utilities, ...]    root is always folders[0]
//!  - services: [Utilities/Water, Parks, ...]
//!  - layers:   [...]
//!  - tables:   [...]
//! ```
//!
//! Nodes refer to each other by index. Children are index lists in listing
//! order, and the parent link is an index too, so there are no cycles to
//! break when the tree is written out and nothing to patch up when it's read
//! back: see [`crate::record`] for the nested form that goes to disk.

use crate::record::{FolderRecord, LayerRecord, ServiceRecord, TableRecord};
use crate::service::{ServiceConfig, ServiceType};
use arcgis::{Document, FolderConfig, LayerConfig, LayerDescriptor, TableConfig, TableDescriptor};
use strum_macros::{Display, EnumString};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct FolderId(usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct ServiceId(usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct LayerId(usize);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct TableId(usize);

/// Any node in a tree.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NodeId {
    Folder(FolderId),
    Service(ServiceId),
    Layer(LayerId),
    Table(TableId),
}

impl From<FolderId> for NodeId {
    fn from(id: FolderId) -> Self {
        Self::Folder(id)
    }
}
impl From<ServiceId> for NodeId {
    fn from(id: ServiceId) -> Self {
        Self::Service(id)
    }
}
impl From<LayerId> for NodeId {
    fn from(id: LayerId) -> Self {
        Self::Layer(id)
    }
}
impl From<TableId> for NodeId {
    fn from(id: TableId) -> Self {
        Self::Table(id)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Folder {
    pub url: String,
    pub name: String,
    pub config: FolderConfig,
    pub folders: Vec<FolderId>,
    pub services: Vec<ServiceId>,

    /// None for the root, and only the root.
    pub parent: Option<FolderId>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Service {
    pub url: String,
    pub name: String,
    pub config: ServiceConfig,

    /// Always empty for Geometry and GP services.
    pub layers: Vec<LayerId>,
    pub tables: Vec<TableId>,

    pub parent: FolderId,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Layer {
    pub url: String,
    pub descriptor: LayerDescriptor,
    pub config: LayerConfig,
    pub parent: ServiceId,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Table {
    pub url: String,
    pub descriptor: TableDescriptor,
    pub config: TableConfig,
    pub parent: ServiceId,
}

impl Service {
    pub fn service_type(&self) -> ServiceType {
        self.config.service_type()
    }
}

impl Layer {
    pub fn id(&self) -> i64 {
        self.descriptor.id
    }
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
    pub fn parent_layer_id(&self) -> i64 {
        self.descriptor.parent_layer_id
    }
    pub fn default_visibility(&self) -> bool {
        self.descriptor.default_visibility
    }

    /// (min, max), where 0 means unbounded.
    pub fn scale_range(&self) -> (f64, f64) {
        (self.descriptor.min_scale, self.descriptor.max_scale)
    }

    /// Always "Feature Layer"; anything else fails resolution.
    pub fn layer_type(&self) -> &str {
        &self.descriptor.layer_type
    }
    pub fn geometry_type(&self) -> Option<&str> {
        self.descriptor.geometry_type.as_deref()
    }
}

impl Table {
    pub fn id(&self) -> i64 {
        self.descriptor.id
    }
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// How many of each kind of node a tree holds.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Stats {
    pub folders: usize,
    pub services: usize,
    pub layers: usize,
    pub tables: usize,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} folders, {} services, {} layers, {} tables",
            self.folders, self.services, self.layers, self.tables
        )
    }
}

/// The two ways a node's document gets served.
#[derive(Debug, PartialEq, Clone, Copy, EnumString, Display)]
pub enum Format {
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "pjson")]
    PrettyJson,
}

/// A fully resolved directory.
///
/// The only way to get one is from a complete [`FolderRecord`], which is
/// what keeps half-built trees out of circulation. In a tree built that way:
///
///  - The root is `folders[0]`, and is the only folder without a parent.
///  - Nodes are stored in depth-first pre-order, so every parent index is
///    lower than its children's, and walking up always ends at the root.
///  - Two trees built from equal records are equal.
///
/// Ids index straight into the arena. Passing an id from some other tree is
/// a bug and may panic.
#[derive(Debug, PartialEq, Clone)]
pub struct Tree {
    folders: Vec<Folder>,
    services: Vec<Service>,
    layers: Vec<Layer>,
    tables: Vec<Table>,
}

impl From<FolderRecord> for Tree {
    fn from(root: FolderRecord) -> Self {
        let mut tree = Self {
            folders: vec![],
            services: vec![],
            layers: vec![],
            tables: vec![],
        };
        tree.insert_folder(root, None);
        tree
    }
}

impl Tree {
    fn insert_folder(&mut self, rec: FolderRecord, parent: Option<FolderId>) -> FolderId {
        let id = FolderId(self.folders.len());
        self.folders.push(Folder {
            url: rec.url,
            name: rec.name,
            config: rec.folder_config,
            folders: vec![],
            services: vec![],
            parent,
        });
        let folders = rec
            .folders
            .into_iter()
            .map(|f| self.insert_folder(f, Some(id)))
            .collect();
        let services = rec
            .services
            .into_iter()
            .map(|s| self.insert_service(s, id))
            .collect();
        let folder = &mut self.folders[id.0];
        folder.folders = folders;
        folder.services = services;
        id
    }

    fn insert_service(&mut self, rec: ServiceRecord, parent: FolderId) -> ServiceId {
        let id = ServiceId(self.services.len());
        let layers = rec
            .layers
            .into_iter()
            .map(|l| {
                self.layers.push(Layer {
                    url: l.url,
                    descriptor: l.descriptor,
                    config: l.layer_config,
                    parent: id,
                });
                LayerId(self.layers.len() - 1)
            })
            .collect();
        let tables = rec
            .tables
            .into_iter()
            .map(|t| {
                self.tables.push(Table {
                    url: t.url,
                    descriptor: t.descriptor,
                    config: t.table_config,
                    parent: id,
                });
                TableId(self.tables.len() - 1)
            })
            .collect();
        self.services.push(Service {
            url: rec.url,
            name: rec.name,
            config: rec.service,
            layers,
            tables,
            parent,
        });
        id
    }

    /// The nested form, for writing out.
    pub fn to_record(&self) -> FolderRecord {
        self.folder_record(self.root())
    }

    fn folder_record(&self, id: FolderId) -> FolderRecord {
        let folder = self.folder(id);
        FolderRecord {
            url: folder.url.clone(),
            name: folder.name.clone(),
            folder_config: folder.config.clone(),
            folders: folder.folders.iter().map(|&f| self.folder_record(f)).collect(),
            services: folder.services.iter().map(|&s| self.service_record(s)).collect(),
        }
    }

    fn service_record(&self, id: ServiceId) -> ServiceRecord {
        let service = self.service(id);
        ServiceRecord {
            url: service.url.clone(),
            name: service.name.clone(),
            service: service.config.clone(),
            layers: service
                .layers
                .iter()
                .map(|&l| {
                    let layer = self.layer(l);
                    LayerRecord {
                        url: layer.url.clone(),
                        descriptor: layer.descriptor.clone(),
                        layer_config: layer.config.clone(),
                    }
                })
                .collect(),
            tables: service
                .tables
                .iter()
                .map(|&t| {
                    let table = self.table(t);
                    TableRecord {
                        url: table.url.clone(),
                        descriptor: table.descriptor.clone(),
                        table_config: table.config.clone(),
                    }
                })
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn root(&self) -> FolderId {
        FolderId(0)
    }

    pub fn folder(&self, id: FolderId) -> &Folder {
        &self.folders[id.0]
    }
    pub fn service(&self, id: ServiceId) -> &Service {
        &self.services[id.0]
    }
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }
    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn url(&self, node: NodeId) -> &str {
        match node {
            NodeId::Folder(id) => &self.folder(id).url,
            NodeId::Service(id) => &self.service(id).url,
            NodeId::Layer(id) => &self.layer(id).url,
            NodeId::Table(id) => &self.table(id).url,
        }
    }

    /// What to call a node in navigation.
    pub fn label(&self, node: NodeId) -> &str {
        match node {
            NodeId::Folder(id) => &self.folder(id).name,
            NodeId::Service(id) => &self.service(id).name,
            NodeId::Layer(id) => self.layer(id).name(),
            NodeId::Table(id) => self.table(id).name(),
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        match node {
            NodeId::Folder(id) => self.folder(id).parent.map(NodeId::Folder),
            NodeId::Service(id) => Some(self.service(id).parent.into()),
            NodeId::Layer(id) => Some(self.layer(id).parent.into()),
            NodeId::Table(id) => Some(self.table(id).parent.into()),
        }
    }

    /// Folders before services, layers before tables, each in listing order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        match node {
            NodeId::Folder(id) => {
                let folder = self.folder(id);
                let folders = folder.folders.iter().map(|&f| NodeId::from(f));
                let services = folder.services.iter().map(|&s| NodeId::from(s));
                folders.chain(services).collect()
            }
            NodeId::Service(id) => {
                let service = self.service(id);
                let layers = service.layers.iter().map(|&l| NodeId::from(l));
                let tables = service.tables.iter().map(|&t| NodeId::from(t));
                layers.chain(tables).collect()
            }
            NodeId::Layer(_) | NodeId::Table(_) => vec![],
        }
    }

    /// Number of steps up to the root.
    pub fn depth(&self, node: NodeId) -> usize {
        std::iter::successors(self.parent(node), |&n| self.parent(n)).count()
    }

    /// Every node, folders first, then services, layers, and tables.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        let folders = (0..self.folders.len()).map(|i| NodeId::Folder(FolderId(i)));
        let services = (0..self.services.len()).map(|i| NodeId::Service(ServiceId(i)));
        let layers = (0..self.layers.len()).map(|i| NodeId::Layer(LayerId(i)));
        let tables = (0..self.tables.len()).map(|i| NodeId::Table(TableId(i)));
        folders.chain(services).chain(layers).chain(tables)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// The node at exactly this URL. A trailing slash doesn't matter.
    pub fn find(&self, url: &str) -> Option<NodeId> {
        let url = url.trim_end_matches('/');
        self.nodes()
            .find(|&n| self.url(n).trim_end_matches('/') == url)
    }

    /// The node whose URL has this path, whatever the host.
    ///
    /// This is how a republished copy of the directory routes its requests.
    /// Paths compare in their percent-encoded form.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let path = path.trim_end_matches('/');
        self.nodes().find(|&n| match url::Url::parse(self.url(n)) {
            Ok(u) => u.path().trim_end_matches('/') == path,
            Err(_) => false,
        })
    }

    pub fn stats(&self) -> Stats {
        Stats {
            folders: self.folders.len(),
            services: self.services.len(),
            layers: self.layers.len(),
            tables: self.tables.len(),
        }
    }

    /// One indented line per node, in the order the directory lists them.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_node(self.root().into(), 0, &mut out);
        out
    }

    fn outline_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let line = match node {
            NodeId::Folder(id) => format!("FOLDER {}", self.folder(id).name),
            NodeId::Service(id) => {
                let service = self.service(id);
                format!("SERVICE {} ({})", service.name, service.service_type())
            }
            NodeId::Layer(id) => {
                let layer = self.layer(id);
                format!("LAYER {} {}", layer.id(), layer.name())
            }
            NodeId::Table(id) => {
                let table = self.table(id);
                format!("TABLE {} {}", table.id(), table.name())
            }
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&line);
        out.push('\n');
        for child in self.children(node) {
            self.outline_node(child, depth + 1, out);
        }
    }

    /// The node's own document, as the server would have served it.
    pub fn document(&self, node: NodeId, format: Format) -> serde_json::Result<String> {
        let pretty = format == Format::PrettyJson;
        fn render<D: Document>(doc: &D, pretty: bool) -> serde_json::Result<String> {
            match pretty {
                true => doc.to_pretty_json(),
                false => doc.to_json(),
            }
        }
        match node {
            NodeId::Folder(id) => render(&self.folder(id).config, pretty),
            NodeId::Service(id) => self.service(id).config.to_json(pretty),
            NodeId::Layer(id) => render(&self.layer(id).config, pretty),
            NodeId::Table(id) => render(&self.table(id).config, pretty),
        }
    }
}
