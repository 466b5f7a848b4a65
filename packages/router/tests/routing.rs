use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use collection_literals::btree;
use tokio::sync::Notify;

use rio_fop::{
    Addressing, Bytes, Errno, Fd, FopKind, Gfid, IaType, Iatt, Inode, Loc, Operation, Reply,
    ReplyAttrs, RoutingKey,
};
use rio_layout::{BucketLayout, LayoutResolver, Layouts, Plane, Subvolume};
use rio_router::{ForwardError, Forwarder, RouteError, Router, RouterConfig};

/// Records every forwarded call and answers with a fixed reply.
struct RecordingForwarder {
    calls: Mutex<Vec<(String, Operation)>>,
    reply: Reply,
}

impl RecordingForwarder {
    fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> Vec<(String, Operation)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn forward(
        &self,
        subvolume: &Subvolume,
        operation: Operation,
    ) -> Result<Reply, ForwardError> {
        self.calls
            .lock()
            .unwrap()
            .push((subvolume.name().to_string(), operation));
        Ok(self.reply.clone())
    }
}

/// Counts resolutions, optionally owning nothing.
struct CountingLayout {
    inner: Option<BucketLayout>,
    queries: AtomicUsize,
}

impl CountingLayout {
    fn over(plane: Plane, names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            inner: Some(BucketLayout::new(plane, names.iter().copied()).unwrap()),
            queries: AtomicUsize::new(0),
        })
    }

    fn empty() -> Arc<Self> {
        Arc::new(Self {
            inner: None,
            queries: AtomicUsize::new(0),
        })
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl LayoutResolver for CountingLayout {
    fn resolve(&self, key: &RoutingKey) -> Option<Subvolume> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.as_ref().and_then(|layout| layout.resolve(key))
    }
}

struct Fixture {
    router: Router,
    forwarder: Arc<RecordingForwarder>,
    metadata: Arc<CountingLayout>,
    data: Arc<CountingLayout>,
}

fn fixture_with(metadata: Arc<CountingLayout>, reply: Reply) -> Fixture {
    let data = CountingLayout::over(Plane::Data, &["ds-0", "ds-1", "ds-2"]);
    let forwarder = RecordingForwarder::replying(reply);
    let router = Router::new(
        Layouts::new(metadata.clone(), data.clone()),
        forwarder.clone(),
        RouterConfig::new("mds-0:mds-1", "ds-0:ds-1:ds-2"),
    );
    Fixture {
        router,
        forwarder,
        metadata,
        data,
    }
}

fn fixture(reply: Reply) -> Fixture {
    fixture_with(CountingLayout::over(Plane::Metadata, &["mds-0", "mds-1"]), reply)
}

fn data_iatt(size: u64) -> Iatt {
    Iatt {
        gfid: Gfid::ROOT,
        ia_type: IaType::Regular,
        ino: 12,
        dev: 64769,
        nlink: 1,
        uid: 1000,
        gid: 100,
        prot: 0o644,
        size,
        blksize: 4096,
        blocks: 1,
        ctime: 1_700_000_000,
        ..Default::default()
    }
}

fn fd_op(kind: FopKind, gfid: Gfid) -> Operation {
    Operation::new(kind, Addressing::Descriptor(Fd::new(Inode::shared(gfid))))
}

#[tokio::test]
async fn test_create_routes_by_parent_on_metadata_plane() {
    let entry = ReplyAttrs::Entry {
        buf: data_iatt(0),
        preparent: data_iatt(0),
        postparent: data_iatt(0),
    };
    let reply = Reply::success(0).with_attrs(entry);
    let f = fixture(reply.clone());

    let parent = Gfid::generate();
    let op = Operation::new(
        FopKind::Create,
        Addressing::Entry(Loc::entry(Inode::shared(parent), "notes.txt")),
    );
    let expected = BucketLayout::new(Plane::Metadata, ["mds-0", "mds-1"])
        .unwrap()
        .resolve(&RoutingKey::new(parent).unwrap())
        .unwrap();

    let got = f.router.call(op).await.unwrap();

    assert_eq!(got, reply);
    let calls = f.forwarder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, expected.name());
    assert_eq!(calls[0].1.kind, FopKind::Create);
    assert_eq!(f.metadata.queries(), 1);
    assert_eq!(f.data.queries(), 0);
}

#[tokio::test]
async fn test_readv_routes_on_data_plane_and_is_cleansed() {
    let reply = Reply::success(4)
        .with_attrs(ReplyAttrs::Post(data_iatt(4)))
        .with_payload("data");
    let f = fixture(reply);

    let got = f.router.call(fd_op(FopKind::Readv, Gfid::generate())).await.unwrap();

    assert_eq!(got.op_ret, 4);
    assert_eq!(got.payload, Bytes::from_static(b"data"));
    match got.attrs {
        ReplyAttrs::Post(buf) => {
            assert_eq!(buf.size, 4);
            assert_eq!(buf.blksize, 4096);
            assert_eq!(buf.ia_type, IaType::Regular);
            assert_eq!(buf.ino, 0);
            assert_eq!(buf.dev, 0);
            assert_eq!(buf.uid, 0);
            assert_eq!(buf.prot, 0);
            assert_eq!(buf.ctime, 0);
        }
        other => panic!("unexpected attrs {:?}", other),
    }
    assert!(f.forwarder.calls()[0].0.starts_with("ds-"));
    assert_eq!(f.data.queries(), 1);
    assert_eq!(f.metadata.queries(), 0);
}

#[tokio::test]
async fn test_writev_cleanses_pre_and_post() {
    let reply = Reply::success(3).with_attrs(ReplyAttrs::PrePost {
        pre: data_iatt(0),
        post: data_iatt(3),
    });
    let f = fixture(reply);

    let got = f.router.call(fd_op(FopKind::Writev, Gfid::generate())).await.unwrap();

    assert_eq!(
        got.attrs,
        ReplyAttrs::PrePost {
            pre: data_iatt(0).cleansed_data(),
            post: data_iatt(3).cleansed_data(),
        }
    );
}

#[tokio::test]
async fn test_missing_identity_never_forwards() {
    let f = fixture(Reply::success(0));
    let loc = Loc::of_gfid(Gfid::NULL).with_inode(Inode::shared(Gfid::NULL));
    let op = Operation::new(FopKind::Stat, Addressing::Inode(loc));

    let err = f.router.call(op).await.unwrap_err();

    assert!(matches!(err, RouteError::MissingIdentity { kind: FopKind::Stat }));
    assert_eq!(err.errno(), Errno::EINVAL);
    assert!(f.forwarder.calls().is_empty());
    assert_eq!(f.metadata.queries(), 0);
}

#[tokio::test]
async fn test_unresolved_subvolume_never_forwards() {
    let f = fixture_with(CountingLayout::empty(), Reply::success(0));
    let key = Gfid::generate();
    let op = Operation::new(FopKind::Getxattr, Addressing::Inode(Loc::of_gfid(key)));

    let err = f.router.call(op).await.unwrap_err();

    match err {
        RouteError::UnresolvedSubvolume { plane, key: got } => {
            assert_eq!(plane, Plane::Metadata);
            assert_eq!(got.gfid(), key);
        }
        other => panic!("expected unresolved, got {:?}", other),
    }
    assert_eq!(f.metadata.queries(), 1);
    assert!(f.forwarder.calls().is_empty());
}

#[tokio::test]
async fn test_unsupported_is_rejected_before_anything_else() {
    let f = fixture(Reply::success(0));
    let op = Operation::new(
        FopKind::Rename,
        Addressing::Entry(Loc::entry(Inode::shared(Gfid::ROOT), "a")),
    );

    let err = f.router.call(op).await.unwrap_err();

    assert!(matches!(err, RouteError::NotSupported { kind: FopKind::Rename }));
    assert_eq!(err.errno(), Errno::ENOTSUP);
    assert_eq!(f.metadata.queries(), 0);
    assert_eq!(f.data.queries(), 0);
    assert!(f.forwarder.calls().is_empty());
}

#[test]
fn test_routing_failures_complete_before_submit_returns() {
    let f = fixture(Reply::success(0));
    let op = Operation::new(FopKind::Fsync, Addressing::Descriptor(Fd::detached()));

    let completion = f.router.submit(op);

    assert!(matches!(
        completion.try_outcome(),
        Ok(Err(RouteError::NotSupported { .. }))
    ));
}

#[tokio::test]
async fn test_forwarded_unchanged() {
    let f = fixture(Reply::success(0));
    let op = fd_op(FopKind::Fsetxattr, Gfid::generate())
        .with_payload("value")
        .with_xdata(btree! {
            "trusted.rio.layout".to_string() => Bytes::from_static(b"v1"),
        });

    f.router.call(op.clone()).await.unwrap();

    let (_, forwarded) = f.forwarder.calls().remove(0);
    assert_eq!(forwarded.kind, op.kind);
    assert_eq!(forwarded.payload, op.payload);
    assert_eq!(forwarded.xdata, op.xdata);
    assert_eq!(
        forwarded.addressing.fd().and_then(|fd| fd.inode.clone()),
        op.addressing.fd().and_then(|fd| fd.inode.clone())
    );
}

#[tokio::test]
async fn test_plane_isolation_across_the_table() {
    let f = fixture(Reply::success(0));
    let gfid = Gfid::generate();

    for (kind, _, _) in rio_router::ROUTE_TABLE {
        let addressing = match rio_router::classify(*kind) {
            rio_router::Category::MetadataEntry => {
                Addressing::Entry(Loc::entry(Inode::shared(gfid), "x"))
            }
            rio_router::Category::MetadataInode => Addressing::Inode(Loc::of_gfid(gfid)),
            _ => Addressing::Descriptor(Fd::new(Inode::shared(gfid))),
        };
        let before = (f.metadata.queries(), f.data.queries());
        let result = f.router.call(Operation::new(*kind, addressing)).await;
        let after = (f.metadata.queries(), f.data.queries());

        match rio_router::classify(*kind).plane() {
            Some(Plane::Metadata) => {
                assert!(result.is_ok(), "{}", kind);
                assert_eq!(after, (before.0 + 1, before.1), "{}", kind);
            }
            Some(Plane::Data) => {
                assert!(result.is_ok(), "{}", kind);
                assert_eq!(after, (before.0, before.1 + 1), "{}", kind);
            }
            None => {
                assert!(result.is_err(), "{}", kind);
                assert_eq!(after, before, "{}", kind);
            }
        }
    }
}

#[tokio::test]
async fn test_subvolume_failure_reply_is_surfaced() {
    let f = fixture(Reply::failure(Errno::ENOENT));

    let got = f.router.call(fd_op(FopKind::Fstat, Gfid::generate())).await.unwrap();

    assert!(!got.is_success());
    assert_eq!(got.errno(), Some(Errno::ENOENT));
}

#[tokio::test]
async fn test_stale_reply_passes_through() {
    let stale = Reply::failure(Errno::ESTALE).with_attrs(ReplyAttrs::Post(data_iatt(1)));
    let f = fixture(stale.clone());

    let got = f.router.call(fd_op(FopKind::Readv, Gfid::generate())).await.unwrap();

    assert_eq!(got, stale);
    assert_eq!(f.forwarder.calls().len(), 1);
}

struct Disconnected;

#[async_trait]
impl Forwarder for Disconnected {
    async fn forward(
        &self,
        subvolume: &Subvolume,
        _operation: Operation,
    ) -> Result<Reply, ForwardError> {
        Err(ForwardError::Disconnected(subvolume.name().to_string()))
    }
}

#[tokio::test]
async fn test_forwarding_failure_is_not_retried() {
    let router = Router::from_config(RouterConfig::new("mds-0", "ds-0"), Disconnected).unwrap();

    let err = router.call(fd_op(FopKind::Zerofill, Gfid::generate())).await.unwrap_err();

    match &err {
        RouteError::Forwarding {
            kind,
            subvolume,
            source: ForwardError::Disconnected(_),
        } => {
            assert_eq!(*kind, FopKind::Zerofill);
            assert_eq!(subvolume, "ds-0");
        }
        other => panic!("expected forwarding error, got {:?}", other),
    }
    assert_eq!(err.errno(), Errno::ENOTCONN);
}

struct Crashing;

#[async_trait]
impl Forwarder for Crashing {
    async fn forward(
        &self,
        _subvolume: &Subvolume,
        _operation: Operation,
    ) -> Result<Reply, ForwardError> {
        panic!("substrate crashed");
    }
}

#[tokio::test]
async fn test_lost_call_completes_with_dropped() {
    let router = Router::from_config(RouterConfig::new("mds-0", "ds-0"), Crashing).unwrap();

    let err = router.call(fd_op(FopKind::Fstat, Gfid::generate())).await.unwrap_err();

    assert!(matches!(
        err,
        RouteError::Forwarding {
            source: ForwardError::Dropped,
            ..
        }
    ));
}

/// Holds every call until released.
struct Gated {
    gate: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl Forwarder for Gated {
    async fn forward(
        &self,
        _subvolume: &Subvolume,
        _operation: Operation,
    ) -> Result<Reply, ForwardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(Reply::success(0))
    }
}

#[tokio::test]
async fn test_submit_returns_before_the_reply() {
    let gated = Arc::new(Gated {
        gate: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let router = Router::from_config(RouterConfig::new("mds-0", "ds-0"), gated.clone()).unwrap();

    let completion = router.submit(fd_op(FopKind::Seek, Gfid::generate()));
    let Err(completion) = completion.try_outcome() else {
        panic!("completed before the forwarder replied");
    };

    gated.gate.notify_one();
    let reply = completion.await.unwrap();

    assert!(reply.is_success());
    assert_eq!(gated.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_operations_each_forward_once() {
    let f = fixture(Reply::success(0));
    let router = Arc::new(f.router);

    let mut tasks = Vec::new();
    for _ in 0..64 {
        let router = router.clone();
        tasks.push(tokio::spawn(async move {
            router.call(fd_op(FopKind::Writev, Gfid::generate())).await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }

    assert_eq!(f.forwarder.calls().len(), 64);
    assert_eq!(f.data.queries(), 64);
    assert_eq!(f.metadata.queries(), 0);
}
