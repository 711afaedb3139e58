/// Service ports inside each node.
pub mod ports {
    /// ZooKeeper client listener, targeted by the shell protocol checks.
    pub const CLIENT: u16 = 2181;
    /// ZooKeeper peer-to-peer replication port.
    pub const PEER: u16 = 2888;
    /// ZooKeeper leader-election port.
    pub const ELECTION: u16 = 3888;
    /// Schema Registry REST listener, published by the provisioning layer.
    pub const REST: u16 = 8081;
}

/// On-node file and binary locations, as laid out by the topology image.
pub mod paths {
    pub const ZOOKEEPER_DATA_DIR: &str = "/zookeeper";
    pub const ZOOKEEPER_MYID: &str = "/zookeeper/myid";
    pub const ZOOKEEPER_CONFIG: &str = "/zookeeper.properties";

    /// Vendor-supplied broker template, fetched and patched per node.
    pub const BROKER_TEMPLATE: &str = "/confluent/etc/kafka/server.properties";
    pub const BROKER_CONFIG: &str = "/kafka.properties";

    pub const ZOOKEEPER_SHELL: &str = "/confluent/bin/zookeeper-shell";

    pub const START_ZOOKEEPER: &str = "/start_zookeeper";
    pub const START_KAFKA: &str = "/start_kafka";
    pub const START_SCHEMA_REGISTRY: &str = "/start_schema_registry";
}

/// Coordination namespace path where brokers register themselves.
pub const BROKER_IDS_PATH: &str = "/brokers/ids";
