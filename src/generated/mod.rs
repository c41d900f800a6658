pub mod auth {
    tonic::include_proto!("auth");
}
