//! IRIs of the pipeline and configuration ontologies.

/// Core pipeline ontology.
pub mod lp {
    pub const PIPELINE: &str = "http://linkedpipes.com/ontology/Pipeline";
    pub const COMPONENT: &str = "http://linkedpipes.com/ontology/Component";
    pub const HAS_COMPONENT: &str = "http://linkedpipes.com/ontology/component";
    pub const EXECUTION_TYPE: &str = "http://linkedpipes.com/ontology/executionType";
    pub const CONFIGURATION: &str = "http://linkedpipes.com/ontology/configuration";
    pub const CONFIGURATION_GRAPH: &str = "http://linkedpipes.com/ontology/configurationGraph";
    pub const CONFIGURATION_RESOURCE: &str =
        "http://linkedpipes.com/ontology/configurationResource";
    pub const ORDER: &str = "http://linkedpipes.com/ontology/order";
    pub const WORKING_DIRECTORY: &str = "http://linkedpipes.com/ontology/workingDirectory";
    pub const TEMPLATE: &str = "http://linkedpipes.com/ontology/Template";
    pub const HAS_TEMPLATE: &str = "http://linkedpipes.com/ontology/template";
}

/// Execution strategies a component may declare.
pub mod execution_type {
    pub const EXECUTE: &str = "http://linkedpipes.com/resources/execution/type/execute";
    pub const MAP: &str = "http://linkedpipes.com/resources/execution/type/mapped";
    pub const SKIP: &str = "http://linkedpipes.com/resources/execution/type/skip";
}

/// Configuration description ontology.
pub mod config {
    /// Type of every configuration description resource.
    pub const CONFIGURATION_DESCRIPTION: &str =
        "http://plugins.linkedpipes.com/ontology/ConfigurationDescription";
    pub const MEMBER_TYPE: &str =
        "http://plugins.linkedpipes.com/ontology/configuration/ConfigurationMember";
    pub const TYPE: &str = "http://plugins.linkedpipes.com/ontology/configuration/type";
    pub const MEMBER: &str = "http://plugins.linkedpipes.com/ontology/configuration/member";
    pub const PROPERTY: &str = "http://plugins.linkedpipes.com/ontology/configuration/property";
    pub const CONTROL: &str = "http://plugins.linkedpipes.com/ontology/configuration/control";

    /// Override markers: the value is inherited from an upper layer.
    pub const INHERIT: &str = "http://plugins.linkedpipes.com/resource/configuration/Inherit";
    /// Override markers: the value is forced by an upper layer.
    pub const FORCED: &str = "http://plugins.linkedpipes.com/resource/configuration/Forced";
    pub const NONE: &str = "http://plugins.linkedpipes.com/resource/configuration/None";
}
