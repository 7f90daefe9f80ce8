#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoView {
    #[prost(uint64, tag = "1")]
    pub epoch: u64,
    /// Empty string means "no server in this slot".
    #[prost(string, tag = "2")]
    pub primary: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub backup: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPingReq {
    #[prost(string, tag = "1")]
    pub caller_address: ::prost::alloc::string::String,
    /// 0 means the caller (re)started and wants to register.
    #[prost(uint64, tag = "2")]
    pub reported_epoch: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPingReply {
    #[prost(message, optional, tag = "1")]
    pub view: ::core::option::Option<ProtoView>,
    /// Set only in the reply to the ping that created view 1.
    #[prost(bool, tag = "2")]
    pub initialized_view: bool,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetViewReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetViewReply {
    #[prost(message, optional, tag = "1")]
    pub view: ::core::option::Option<ProtoView>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReq {
    #[prost(uint64, tag = "1")]
    pub client_id: u64,
    #[prost(uint64, tag = "2")]
    pub token: u64,
    #[prost(string, tag = "3")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub value: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub combine_with_hash: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutResult {
    #[prost(oneof = "proto_put_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_put_result::Result>,
}
/// Nested message and enum types in `ProtoPutResult`.
pub mod proto_put_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoPutSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoPbError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutSuccess {
    #[prost(string, tag = "1")]
    pub previous_value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub get_all: bool,
    /// With `get_all`: the view epoch the requesting backup is bootstrapping for.
    #[prost(uint64, tag = "3")]
    pub epoch: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetResult {
    #[prost(oneof = "proto_get_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_get_result::Result>,
}
/// Nested message and enum types in `ProtoGetResult`.
pub mod proto_get_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoGetSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoPbError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetSuccess {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
    /// Only set when the request had `get_all`.
    #[prost(message, optional, tag = "2")]
    pub snapshot: ::core::option::Option<ProtoSnapshot>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSnapshot {
    #[prost(map = "string, string", tag = "1")]
    pub store:
        ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "2")]
    pub filter: ::prost::alloc::vec::Vec<ProtoFilterEntry>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFilterEntry {
    #[prost(uint64, tag = "1")]
    pub client_id: u64,
    #[prost(uint64, tag = "2")]
    pub token: u64,
    #[prost(string, tag = "3")]
    pub previous_value: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoShutdownReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoShutdownReply {
    #[prost(uint64, tag = "1")]
    pub requests_served: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPbError {
    #[prost(oneof = "proto_pb_error::Err", tags = "1, 2, 3, 4")]
    pub err: ::core::option::Option<proto_pb_error::Err>,
}
/// Nested message and enum types in `ProtoPbError`.
pub mod proto_pb_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        WrongServer(super::ProtoWrongServer),
        #[prost(message, tag = "2")]
        NoKey(super::ProtoNoKey),
        #[prost(message, tag = "3")]
        SyncFailure(super::ProtoSyncFailure),
        #[prost(message, tag = "4")]
        ServerFault(super::ProtoServerFault),
    }
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWrongServer {}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNoKey {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSyncFailure {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoServerFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[doc = r" Generated client implementations."]
pub mod grpc_view_service_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcViewServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcViewServiceClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcViewServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn ping(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPingReq>,
        ) -> Result<tonic::Response<super::ProtoPingReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcViewService/Ping");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetViewReq>,
        ) -> Result<tonic::Response<super::ProtoGetViewReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcViewService/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcViewServiceClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcViewServiceClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcViewServiceClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_pb_service_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcPbServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcPbServiceClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcPbServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Client write, served by the primary only."]
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcPbService/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Primary -> backup forward of an accepted write."]
        pub async fn sync_put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcPbService/SyncPut");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Client read (or full snapshot when `get_all` is set), served by the primary only."]
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcPbService/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Test/teardown hook."]
        pub async fn shutdown(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoShutdownReq>,
        ) -> Result<tonic::Response<super::ProtoShutdownReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/pbkv.GrpcPbService/Shutdown");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcPbServiceClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcPbServiceClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcPbServiceClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_view_service_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcViewServiceServer."]
    #[async_trait]
    pub trait GrpcViewService: Send + Sync + 'static {
        async fn ping(
            &self,
            request: tonic::Request<super::ProtoPingReq>,
        ) -> Result<tonic::Response<super::ProtoPingReply>, tonic::Status>;
        async fn get(
            &self,
            request: tonic::Request<super::ProtoGetViewReq>,
        ) -> Result<tonic::Response<super::ProtoGetViewReply>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcViewServiceServer<T: GrpcViewService> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcViewService> GrpcViewServiceServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcViewServiceServer<T>
    where
        T: GrpcViewService,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/pbkv.GrpcViewService/Ping" => {
                    #[allow(non_camel_case_types)]
                    struct PingSvc<T: GrpcViewService>(pub Arc<T>);
                    impl<T: GrpcViewService> tonic::server::UnaryService<super::ProtoPingReq> for PingSvc<T> {
                        type Response = super::ProtoPingReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPingReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).ping(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/pbkv.GrpcViewService/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: GrpcViewService>(pub Arc<T>);
                    impl<T: GrpcViewService> tonic::server::UnaryService<super::ProtoGetViewReq> for GetSvc<T> {
                        type Response = super::ProtoGetViewReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetViewReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcViewService> Clone for GrpcViewServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcViewService> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcViewService> tonic::transport::NamedService for GrpcViewServiceServer<T> {
        const NAME: &'static str = "pbkv.GrpcViewService";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_pb_service_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcPbServiceServer."]
    #[async_trait]
    pub trait GrpcPbService: Send + Sync + 'static {
        #[doc = " Client write, served by the primary only."]
        async fn put(
            &self,
            request: tonic::Request<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status>;
        #[doc = " Primary -> backup forward of an accepted write."]
        async fn sync_put(
            &self,
            request: tonic::Request<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoPutResult>, tonic::Status>;
        #[doc = " Client read (or full snapshot when `get_all` is set), served by the primary only."]
        async fn get(
            &self,
            request: tonic::Request<super::ProtoGetReq>,
        ) -> Result<tonic::Response<super::ProtoGetResult>, tonic::Status>;
        #[doc = " Test/teardown hook."]
        async fn shutdown(
            &self,
            request: tonic::Request<super::ProtoShutdownReq>,
        ) -> Result<tonic::Response<super::ProtoShutdownReply>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcPbServiceServer<T: GrpcPbService> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcPbService> GrpcPbServiceServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcPbServiceServer<T>
    where
        T: GrpcPbService,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/pbkv.GrpcPbService/Put" => {
                    #[allow(non_camel_case_types)]
                    struct PutSvc<T: GrpcPbService>(pub Arc<T>);
                    impl<T: GrpcPbService> tonic::server::UnaryService<super::ProtoPutReq> for PutSvc<T> {
                        type Response = super::ProtoPutResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/pbkv.GrpcPbService/SyncPut" => {
                    #[allow(non_camel_case_types)]
                    struct SyncPutSvc<T: GrpcPbService>(pub Arc<T>);
                    impl<T: GrpcPbService> tonic::server::UnaryService<super::ProtoPutReq> for SyncPutSvc<T> {
                        type Response = super::ProtoPutResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).sync_put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SyncPutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/pbkv.GrpcPbService/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: GrpcPbService>(pub Arc<T>);
                    impl<T: GrpcPbService> tonic::server::UnaryService<super::ProtoGetReq> for GetSvc<T> {
                        type Response = super::ProtoGetResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/pbkv.GrpcPbService/Shutdown" => {
                    #[allow(non_camel_case_types)]
                    struct ShutdownSvc<T: GrpcPbService>(pub Arc<T>);
                    impl<T: GrpcPbService> tonic::server::UnaryService<super::ProtoShutdownReq> for ShutdownSvc<T> {
                        type Response = super::ProtoShutdownReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoShutdownReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).shutdown(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ShutdownSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcPbService> Clone for GrpcPbServiceServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcPbService> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcPbService> tonic::transport::NamedService for GrpcPbServiceServer<T> {
        const NAME: &'static str = "pbkv.GrpcPbService";
    }
}
